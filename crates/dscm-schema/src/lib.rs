//! # dscm-schema — JSON Schema Validation
//!
//! Delegates payload validation to the `jsonschema` engine and reshapes its
//! output into the shared [`dscm_core::ValidationError`] model, so a schema
//! violation reaches clients in the same `{"details": [...]}` shape as any
//! hand-written field check.
//!
//! - [`SchemaValidator`] compiles a schema once for repeated use.
//! - [`validate_against_schema`] is the one-shot byte-level entry point.
//! - [`load_document`] reads JSON or YAML files for offline validation.
//!
//! ## Crate Policy
//!
//! - Depends only on `dscm-core` internally.
//! - Never panics on malformed schemas or documents; those become a single
//!   `none_field_error` diagnostic or a [`SchemaError`].

pub mod error;
pub mod validate;

pub use error::SchemaError;
pub use validate::{
    load_document, pointer_to_field, schema_keyword, validate_against_schema, yaml_to_json_value,
    SchemaValidator, VALIDATOR_ERROR_PREFIX,
};
