//! # Fact Collector — one walk, every cross-check input
//!
//! [`collect`] walks the tree exactly once and accumulates everything the
//! semantic validator needs to reconcile `tree` against `meta`:
//!
//! - the multiset of node names (duplicate detection reports every name
//!   that occurs more than once, with its count);
//! - for every dynamic trait key, the set of distinct values it takes
//!   anywhere in the tree;
//! - which well-known node-attr keys occur at all (advisory input);
//! - the set of mutation gene keys (excluding the reserved `nuc` slot) and
//!   whether any `nuc` mutations were seen;
//! - node count, leaf count, and maximum depth.
//!
//! One linear pass: O(total node count x average attributes per node). The
//! collector never judges; reconciliation lives in `arbor-schema`.

use std::collections::{BTreeMap, BTreeSet};

use crate::tree::{TraitValue, TreeNode};
use crate::walk::walk;

// ---------------------------------------------------------------------------
// Observed values
// ---------------------------------------------------------------------------

/// A trait value as stored in fact sets. Numbers are keyed by their exact
/// JSON literal so the set is ordered and equality is representation-exact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FactValue {
    /// A boolean value.
    Bool(bool),
    /// A numeric value, by its literal rendering (e.g. `"2021.417"`).
    Number(String),
    /// A string value.
    Text(String),
}

impl FactValue {
    fn from_trait(value: &TraitValue) -> Self {
        match value {
            TraitValue::Bool(b) => FactValue::Bool(*b),
            TraitValue::Number(n) => FactValue::Number(n.to_string()),
            TraitValue::Text(s) => FactValue::Text(s.clone()),
        }
    }

    /// The value as the text it renders to: the string itself, the numeric
    /// literal, or `true`/`false`.
    pub fn rendering(&self) -> &str {
        match self {
            FactValue::Bool(true) => "true",
            FactValue::Bool(false) => "false",
            FactValue::Number(literal) => literal,
            FactValue::Text(text) => text,
        }
    }
}

/// Everything observed for one dynamic trait key.
#[derive(Debug, Clone, Default)]
pub struct TraitObservations {
    /// How many nodes carry the key.
    pub occurrences: usize,
    /// Distinct values observed under the key.
    pub values: BTreeSet<FactValue>,
}

// ---------------------------------------------------------------------------
// Facts
// ---------------------------------------------------------------------------

/// The whole-tree working set produced by [`collect`]. Owned exclusively by
/// one engine call; nothing persists across calls.
#[derive(Debug, Clone, Default)]
pub struct Facts {
    name_counts: BTreeMap<String, usize>,
    traits: BTreeMap<String, TraitObservations>,
    known_attr_keys: BTreeSet<&'static str>,
    mutation_genes: BTreeSet<String>,
    saw_nuc_mutations: bool,
    node_count: usize,
    leaf_count: usize,
    max_depth: usize,
}

impl Facts {
    /// Names occurring more than once, with their occurrence counts.
    pub fn duplicate_names(&self) -> impl Iterator<Item = (&str, usize)> {
        self.name_counts
            .iter()
            .filter(|(_, &count)| count >= 2)
            .map(|(name, &count)| (name.as_str(), count))
    }

    /// True when at least one node carries the dynamic trait `key`.
    pub fn has_trait(&self, key: &str) -> bool {
        self.traits.contains_key(key)
    }

    /// Every dynamic trait key observed anywhere in the tree.
    pub fn trait_keys(&self) -> impl Iterator<Item = &str> {
        self.traits.keys().map(String::as_str)
    }

    /// Observations for one dynamic trait key, if any node carries it.
    pub fn trait_observations(&self, key: &str) -> Option<&TraitObservations> {
        self.traits.get(key)
    }

    /// Renderings of every distinct value observed under `key`: the
    /// deme-like values a geo resolution with that key must cover. Numeric
    /// and boolean values render to their literal (`12`, `true`); they can
    /// never match a deme name, so their failed lookups surface too.
    pub fn observed_demes<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.traits
            .get(key)
            .into_iter()
            .flat_map(|obs| obs.values.iter().map(FactValue::rendering))
    }

    /// True when `key` occurs on some node, as a dynamic trait or as one of
    /// the well-known attributes (`div`, `num_date`, ...).
    pub fn has_node_attribute(&self, key: &str) -> bool {
        self.traits.contains_key(key) || self.known_attr_keys.contains(key)
    }

    /// Gene keys observed under `branch_attrs.mutations`, `nuc` excluded.
    pub fn mutation_genes(&self) -> &BTreeSet<String> {
        &self.mutation_genes
    }

    /// True when any branch carries at least one `nuc` mutation token.
    pub fn saw_nuc_mutations(&self) -> bool {
        self.saw_nuc_mutations
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Maximum depth (root = 0).
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Walk the tree once and accumulate all reconciliation facts.
pub fn collect(root: &TreeNode) -> Facts {
    let mut facts = Facts::default();

    for visit in walk(root) {
        facts.node_count += 1;
        facts.max_depth = facts.max_depth.max(visit.depth);
        if visit.node.is_leaf() {
            facts.leaf_count += 1;
        }
        *facts
            .name_counts
            .entry(visit.node.name.clone())
            .or_insert(0) += 1;

        if let Some(attrs) = &visit.node.node_attrs {
            if attrs.div.is_some() {
                facts.known_attr_keys.insert("div");
            }
            if attrs.num_date.is_some() {
                facts.known_attr_keys.insert("num_date");
            }
            if attrs.vaccine.is_some() {
                facts.known_attr_keys.insert("vaccine");
            }
            if attrs.hidden.is_some() {
                facts.known_attr_keys.insert("hidden");
            }
            if attrs.url.is_some() {
                facts.known_attr_keys.insert("url");
            }
            if attrs.author.is_some() {
                facts.known_attr_keys.insert("author");
            }
            if attrs.accession.is_some() {
                facts.known_attr_keys.insert("accession");
            }
            for (key, entry) in &attrs.traits {
                let obs = facts.traits.entry(key.clone()).or_default();
                obs.occurrences += 1;
                obs.values.insert(FactValue::from_trait(&entry.value));
            }
        }

        if let Some(branch) = &visit.node.branch_attrs {
            if let Some(mutations) = &branch.mutations {
                if mutations.nuc.as_ref().is_some_and(|m| !m.is_empty()) {
                    facts.saw_nuc_mutations = true;
                }
                for gene in mutations.genes.keys() {
                    facts.mutation_genes.insert(gene.clone());
                }
            }
        }
    }

    tracing::debug!(
        nodes = facts.node_count,
        leaves = facts.leaf_count,
        max_depth = facts.max_depth,
        trait_keys = facts.traits.len(),
        "collected tree facts"
    );

    facts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
