//! # Serializer — canonical output bytes
//!
//! Emits the final nested document once validation has passed. The
//! depth-first emission walk is the derived `Serialize` over the owned
//! model, which carries the field-omission rules itself: absent optionals
//! are skipped (never emitted as `null`), child order is preserved exactly
//! as given, and keyed mappings iterate in `BTreeMap` order, so the bytes
//! are deterministic for a given dataset.
//!
//! Numbers print with shortest round-trip formatting (`div`,
//! `num_date.value`, coordinates lose no precision) and dynamic trait
//! numbers keep their exact upstream literal.
//!
//! The pipeline invokes this only when both validators report zero
//! violations; a rejected dataset never produces bytes.

use crate::document::Dataset;
use crate::error::ArborError;

/// Serialize a validated dataset, pretty-printed with 2-space indent.
///
/// # Errors
///
/// Returns [`ArborError::Serialize`] if the underlying writer fails; the
/// model itself contains nothing unserializable.
pub fn to_bytes(dataset: &Dataset) -> Result<Vec<u8>, ArborError> {
    serde_json::to_vec_pretty(dataset).map_err(|e| ArborError::Serialize(e.to_string()))
}

/// Serialize a validated dataset without insignificant whitespace.
///
/// # Errors
///
/// Returns [`ArborError::Serialize`] if the underlying writer fails.
pub fn to_bytes_compact(dataset: &Dataset) -> Result<Vec<u8>, ArborError> {
    serde_json::to_vec(dataset).map_err(|e| ArborError::Serialize(e.to_string()))
}
