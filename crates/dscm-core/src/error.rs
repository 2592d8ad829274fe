//! # Error Types
//!
//! Errors raised by the core crate. All use `thiserror` for `Display` and
//! `Error` derivation.
//!
//! [`CoreError::Validation`] is the tagged "validation failure" variant: it
//! carries an [`ErrorEnvelope`] and exposes it as its `source()`, so the
//! chain-walking helpers in [`crate::validation`] find the envelope no matter
//! how many layers wrap it.

use thiserror::Error;

use crate::validation::ErrorEnvelope;

/// Top-level error type for the core crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A string that is not part of the machine-code taxonomy.
    #[error("unknown machine code: {0:?}")]
    UnknownCode(String),

    /// A validation location outside body/header/path/query.
    #[error("unknown validation location: {0:?}")]
    UnknownLocation(String),

    /// One or more field-level validation failures.
    #[error("{0}")]
    Validation(#[from] ErrorEnvelope),

    /// A flexible attribute could not be encoded or decoded.
    #[error("invalid JSON structure: {0}")]
    Jsonb(#[from] JsonbError),
}

/// Error from the JSON-backed attribute box.
#[derive(Error, Debug)]
pub enum JsonbError {
    /// The owned value cannot be represented as JSON.
    #[error("value cannot be encoded as JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// Stored bytes are not valid JSON for the target type.
    #[error("stored value cannot be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}
