//! # Tree Node Model — the recursive `tree` block
//!
//! Implements [`TreeNode`] and its attribute blocks. A node owns its children
//! outright (`Vec<TreeNode>`, no back-references, no sharing), so every node
//! is reachable by exactly one path and a plain recursive walk is correct.
//!
//! `node_attrs` mixes a fixed set of well-known keys (`div`, `num_date`,
//! `vaccine`, `hidden`, `url`, `author`, `accession`) with arbitrary dynamic
//! trait keys. The well-known keys are named fields; everything else lands in
//! a flattened map of [`TraitEntry`], so the dynamic key set stays open while
//! the well-known shapes stay typed. Union-typed fields ([`TraitValue`],
//! [`Confidence`]) are tagged sums; validators branch on the variant.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TreeNode
// ---------------------------------------------------------------------------

/// One node of the sample tree. Internal nodes carry a non-empty `children`
/// sequence whose order is meaningful downstream (default left-to-right
/// branch ordering) and must round-trip unchanged; leaves omit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeNode {
    /// Node name. Unique across the whole tree, non-empty, no embedded
    /// whitespace.
    pub name: String,
    /// Attributes of the node itself (dates, traits, authorship).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_attrs: Option<NodeAttrs>,
    /// Attributes of the branch leading to this node (labels, mutations).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_attrs: Option<BranchAttrs>,
    /// Child nodes, in order. Absent for leaves; present-but-empty is a
    /// structural violation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Create a bare node with the given name and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_attrs: None,
            branch_attrs: None,
            children: None,
        }
    }

    /// The node's children, or an empty slice for a leaf.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// True when the node has no children (a present-but-empty `children`
    /// array counts as childless; the structural validator flags it).
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Node attributes
// ---------------------------------------------------------------------------

/// Attributes of a node. The object is open: any key outside the well-known
/// set is a dynamic trait and deserializes into `traits`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttrs {
    /// Cumulative divergence from the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub div: Option<f64>,
    /// Numeric date (decimal year) with optional confidence interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_date: Option<NumDate>,
    /// Vaccine status of this sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaccine: Option<Vaccine>,
    /// Hide this node in certain views: one of {always, divtree, timetree}.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<String>,
    /// Link to more information about the sample, `http(s)` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Publication that contributed the sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Sequence database accession, `[0-9A-Za-z_-]+`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
    /// Dynamic traits (e.g. `country`, `clade_membership`), keyed by trait
    /// name. Any non-well-known key lands here.
    #[serde(flatten)]
    pub traits: BTreeMap<String, TraitEntry>,
}

/// Numeric date of a node: a decimal year plus an optional 2-element
/// confidence interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumDate {
    /// Decimal year (e.g. `2021.417`).
    pub value: f64,
    /// Confidence interval `[lower, upper]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Vec<f64>>,
}

/// Vaccine status. All fields optional; date strings use the same
/// `[0-9X]{4}-[0-9X]{2}-[0-9X]{2}` pattern as `meta.updated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vaccine {
    /// Strain is used to produce a serum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serum: Option<bool>,
    /// Date the strain was selected as a vaccine candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    /// Date vaccination started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Date the vaccine was withdrawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Authorship information for a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Author {
    /// Citation key shown in the client (e.g. `Black et al`).
    pub value: String,
    /// Publication title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Journal name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    /// Link to the paper, `http(s)` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Dynamic traits
// ---------------------------------------------------------------------------

/// One dynamic trait observation on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraitEntry {
    /// The observed value.
    pub value: TraitValue,
    /// Uncertainty of the value, when inferred rather than measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// Shannon entropy of the inference, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entropy: Option<f64>,
}

impl TraitEntry {
    /// Wrap a bare value with no confidence/entropy.
    pub fn of(value: TraitValue) -> Self {
        Self {
            value,
            confidence: None,
            entropy: None,
        }
    }
}

/// A trait value: string, number, or boolean. Numbers keep their exact JSON
/// representation (`serde_json::Number`), so an integer written upstream
/// round-trips as an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    /// Boolean trait (e.g. a presence flag).
    Bool(bool),
    /// Numeric trait, exact literal preserved.
    Number(serde_json::Number),
    /// String trait (the common case: country, clade, host).
    Text(String),
}

impl TraitValue {
    /// The string content, when this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TraitValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Build a text value.
    pub fn text(s: impl Into<String>) -> Self {
        TraitValue::Text(s.into())
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitValue::Bool(b) => write!(f, "{b}"),
            TraitValue::Number(n) => write!(f, "{n}"),
            TraitValue::Text(s) => f.write_str(s),
        }
    }
}

/// Uncertainty encoding of a trait value: either a numeric interval (for
/// continuous traits) or a mapping from alternative value to probability
/// (for discrete traits).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    /// `[lower, upper]`; validated to have exactly two ordered entries.
    Interval(Vec<f64>),
    /// Alternative value to probability in [0, 1].
    Distribution(BTreeMap<String, f64>),
}

// ---------------------------------------------------------------------------
// Branch attributes
// ---------------------------------------------------------------------------

/// Attributes of the branch leading to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchAttrs {
    /// Branch labels keyed by label set (e.g. `clade` -> `19A`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    /// Mutations observed on this branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutations: Option<Mutations>,
}

/// Mutations on a branch. `nuc` has its own reserved slot; every other key
/// is a gene name carrying amino-acid mutation tokens and must be declared
/// in `meta.genome_annotations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutations {
    /// Nucleotide mutation tokens: `A187G`, `insertion 10-12`,
    /// `deletion 40-41`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nuc: Option<Vec<String>>,
    /// Amino-acid mutation tokens per gene, matching `[A-Z*-][0-9]+[A-Z*-]`.
    #[serde(flatten)]
    pub genes: BTreeMap<String, Vec<String>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
