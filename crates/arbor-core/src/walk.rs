//! # Tree Walker — lazy depth-first pre-order traversal
//!
//! [`walk`] yields every node of a tree exactly once, parent before
//! children, children in declared order, together with its depth and the
//! path of names from the root down to (and including) the node. The walk
//! is lazy, finite, restartable, and performs no mutation; every downstream
//! pass (fact collection, structural validation) reuses it.
//!
//! Traversal cannot fail: children are exclusively owned by their parent,
//! so no node is reachable by two paths and cycles cannot be constructed.

use crate::tree::TreeNode;

/// One visited node: the node itself, its depth (root = 0), and the names
/// from the root to this node, inclusive.
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    /// The visited node.
    pub node: &'a TreeNode,
    /// Number of ancestors above this node.
    pub depth: usize,
    /// Node names from the root to this node, inclusive. Used verbatim as
    /// the location of node-level diagnostics.
    pub path: Vec<String>,
}

/// Iterator over a tree in depth-first pre-order. Created by [`walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(&'a TreeNode, Vec<String>)>,
}

/// Start a fresh walk over `root`. May be called any number of times over
/// the same tree.
pub fn walk(root: &TreeNode) -> Walk<'_> {
    Walk {
        stack: vec![(root, vec![root.name.clone()])],
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, path) = self.stack.pop()?;
        // Push right-to-left so the leftmost child is visited first.
        for child in node.children().iter().rev() {
            let mut child_path = path.clone();
            child_path.push(child.name.clone());
            self.stack.push((child, child_path));
        }
        Some(Visit {
            node,
            depth: path.len() - 1,
            path,
        })
    }
}
