//! # Error Types — Operational Error Hierarchy
//!
//! Defines the operational errors of the Arbor engine. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Operational errors (unreadable file, malformed JSON, serializer fault)
//!   are `ArborError` and propagate with `?`.
//! - Validation findings are NOT errors. A dataset full of violations is a
//!   successful engine run; the findings travel in the validation report as
//!   values, so one run surfaces every problem at once.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level operational error type for the Arbor engine.
#[derive(Error, Debug)]
pub enum ArborError {
    /// The dataset file could not be read.
    #[error("could not read dataset file '{path}'")]
    Read {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a well-formed document of the expected shape.
    /// Unknown fields in closed objects and missing required fields surface
    /// here, before validation proper begins.
    #[error("dataset file '{path}' is not a well-formed dataset document: {reason}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Deserializer message, including the JSON location.
        reason: String,
    },

    /// Serializing a validated document failed.
    #[error("dataset serialization failed: {0}")]
    Serialize(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
