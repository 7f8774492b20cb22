//! # arbor-core — Foundational Types for Arbor
//!
//! This crate is the bedrock of the Arbor toolchain. It defines the typed
//! document model for a phylogenetic dataset (the `meta` vocabulary block
//! plus the recursive `tree` block), the depth-first tree walker, the
//! whole-tree fact collector, and the canonical serializer. Every other
//! crate in the workspace depends on `arbor-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Owned recursive tree.** `TreeNode` children are owned by their
//!    parent in a `Vec`. No back-references, no sharing, no arena: a node is
//!    reachable by exactly one path, which is what makes a plain recursive
//!    walk correct and restartable.
//!
//! 2. **Tagged sums for union-typed fields.** Trait values
//!    (string/number/boolean) and confidence encodings (interval or
//!    alternative-to-probability mapping) are enums, never untyped blobs.
//!    Validators branch on the concrete variant.
//!
//! 3. **Omission is modeled, not bolted on.** Every optional field is an
//!    `Option` skipped during serialization when absent. The serializer never
//!    emits `null` placeholders, by construction.
//!
//! 4. **Closed objects are closed at the parse boundary.** Objects the
//!    schema seals carry `deny_unknown_fields`; the intentionally open
//!    dynamic trait and mutation maps are flattened `BTreeMap`s.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `arbor-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod document;
pub mod error;
pub mod facts;
pub mod serialize;
pub mod tree;
pub mod walk;

// Re-export primary types for ergonomic imports.
pub use document::{
    ColoringSpec, Contact, Dataset, DemeCoordinates, DisplayDefaults, GenomeAnnotation,
    GeoResolution, LegendEntry, Meta, ScaleEntry,
};
pub use error::ArborError;
pub use facts::{collect, FactValue, Facts, TraitObservations};
pub use tree::{
    Author, BranchAttrs, Confidence, Mutations, NodeAttrs, NumDate, TraitEntry, TraitValue,
    TreeNode, Vaccine,
};
pub use walk::{walk, Visit, Walk};
