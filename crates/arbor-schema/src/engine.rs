//! # Validate+Serialize Engine
//!
//! The pipeline entry points. One call takes an owned, already-parsed
//! dataset through the whole run:
//!
//! 1. Schema-version gate (short-circuits everything else).
//! 2. Fact collection, one walk.
//! 3. Structural validation.
//! 4. Semantic validation and advisories.
//! 5. Serialization, only when the report is clean.
//!
//! The engine is stateless: every call owns its working set and nothing
//! survives the call. Violations are sorted before the report is returned,
//! so identical documents always produce identical reports.

use arbor_core::{collect, serialize, ArborError, Dataset};

use crate::descriptors::{pattern_mismatch, SUPPORTED_VERSION, VERSION_RE};
use crate::semantic;
use crate::structural;
use crate::violation::{Location, ValidationReport, Violation};

// ---------------------------------------------------------------------------
// Schema-version gate
// ---------------------------------------------------------------------------

/// Checks the schema generation label. Returns the gating violation, if
/// any: either the label is not of the `v<digits>` form at all, or it names
/// a generation this engine does not understand. A dataset that fails the
/// gate receives no further validation; none of the other rules are known
/// to apply to a foreign generation.
pub fn check_schema_version(dataset: &Dataset) -> Option<Violation> {
    let version = &dataset.version;
    if !VERSION_RE.is_match(version) {
        return Some(Violation::schema_version(
            Location::document("version"),
            pattern_mismatch(version, &VERSION_RE),
        ));
    }
    if version != SUPPORTED_VERSION {
        return Some(Violation::schema_version(
            Location::document("version"),
            format!(
                "unsupported dataset generation \"{version}\"; this engine understands \"{SUPPORTED_VERSION}\""
            ),
        ));
    }
    None
}

// ---------------------------------------------------------------------------
// Validation pipeline
// ---------------------------------------------------------------------------

/// Runs the full validation pipeline over one dataset and returns the
/// sorted report. Never fails: every problem with the document itself is a
/// violation inside the report, not an error.
pub fn validate(dataset: &Dataset) -> ValidationReport {
    let mut report = ValidationReport::new();

    // 1. Schema-version gate.
    if let Some(violation) = check_schema_version(dataset) {
        tracing::debug!(version = %dataset.version, "schema version gate failed");
        report.add_violation(violation);
        return report;
    }

    // 2. One walk for the reconciliation facts.
    let facts = collect(&dataset.tree);

    // 3. Field-shape checks.
    for violation in structural::validate_structure(dataset) {
        report.add_violation(violation);
    }

    // 4. Cross-reference checks and advisories. The structural stage has
    // run, so the rules it already covers are not re-flagged here.
    for violation in semantic::validate_semantics_after_structural(&dataset.meta, &facts) {
        report.add_violation(violation);
    }
    for advisory in semantic::advisories(&dataset.meta, &facts) {
        report.add_advisory(advisory);
    }

    report.sort();
    tracing::debug!(
        violations = report.len(),
        advisories = report.advisories().len(),
        "validation finished"
    );
    report
}

// ---------------------------------------------------------------------------
// Process: validate, then serialize or reject
// ---------------------------------------------------------------------------

/// Terminal state of one engine run.
#[derive(Debug)]
pub enum Outcome {
    /// The dataset passed validation and was serialized. Advisories, when
    /// present, are non-fatal hints that did not block the run.
    Serialized {
        /// Canonical JSON bytes of the dataset.
        bytes: Vec<u8>,
        /// Non-fatal hints carried over from validation.
        advisories: Vec<String>,
    },
    /// The dataset failed validation; no bytes were produced.
    Rejected(ValidationReport),
}

/// Validates the dataset and, when the report is clean, serializes it.
///
/// # Errors
///
/// Returns [`ArborError::Serialize`] only for serializer failures on a
/// valid dataset. Invalid documents are not errors; they come back as
/// [`Outcome::Rejected`].
pub fn process(dataset: &Dataset) -> Result<Outcome, ArborError> {
    let report = validate(dataset);
    if !report.is_valid() {
        return Ok(Outcome::Rejected(report));
    }
    let bytes = serialize::to_bytes(dataset)?;
    tracing::debug!(bytes = bytes.len(), "dataset serialized");
    Ok(Outcome::Serialized {
        bytes,
        advisories: report.advisories().to_vec(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
