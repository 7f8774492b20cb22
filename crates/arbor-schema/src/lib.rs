//! # arbor-schema — Dataset Validation Pipeline
//!
//! Validates Arbor dataset documents against the native schema descriptors
//! and reconciles `meta` against the tree, then serializes or rejects.
//!
//! ## Stages (`engine`)
//!
//! [`engine::validate`] runs the pipeline in a fixed order: the
//! schema-version gate, one fact-collection walk, the structural stage,
//! the semantic stage, and the advisory pass. [`engine::process`] adds the
//! final step, producing canonical bytes for a clean report and an
//! [`engine::Outcome::Rejected`] report otherwise.
//!
//! ## Rule Sources (`descriptors`)
//!
//! Every pattern, closed vocabulary, and numeric range the validators
//! enforce lives in [`descriptors`], compiled once and quoted verbatim in
//! violation messages.
//!
//! ## Findings (`violation`)
//!
//! All problems are collected into a [`ValidationReport`] of located,
//! classified [`Violation`]s; nothing short-circuits except the
//! schema-version gate, and reports are sorted so equal documents yield
//! byte-equal output.
//!
//! ## Crate Policy
//!
//! - Depends only on `arbor-core` internally.
//! - Validators never mutate the document and never panic on document
//!   content; every finding is a collected violation.
//! - Violation messages quote the rule they enforce (pattern, vocabulary,
//!   range) so a dataset author can fix the document without reading this
//!   crate's source.

pub mod descriptors;
pub mod engine;
pub mod semantic;
pub mod structural;
pub mod violation;

pub use engine::{check_schema_version, process, validate, Outcome};
pub use semantic::{advisories, validate_semantics, validate_semantics_after_structural};
pub use structural::validate_structure;
pub use violation::{Location, ValidationReport, Violation, ViolationKind};
