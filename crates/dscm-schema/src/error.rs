//! Errors raised while loading schemas and documents.
//!
//! Violations of a schema are not errors here: they are reported as
//! [`dscm_core::ValidationError`] lists. These variants cover the cases
//! where validation could not run at all.

use thiserror::Error;

/// Error preparing a schema or document for validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema bytes are not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    SchemaParse(#[source] serde_json::Error),

    /// The schema is JSON but not a usable JSON Schema.
    #[error("schema cannot be compiled: {0}")]
    SchemaBuild(String),

    /// A YAML node has no JSON equivalent.
    #[error("YAML node at '{field}' cannot be converted to JSON: {reason}")]
    YamlConversion {
        /// Dotted path of the node.
        field: String,
        /// What made it unrepresentable.
        reason: String,
    },

    /// The document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path (or `<bytes>`) of the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}
