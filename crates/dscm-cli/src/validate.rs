//! # Validate Subcommand
//!
//! Validates a JSON or YAML document against a JSON Schema and prints the
//! resulting error envelope. An empty envelope means the document is valid.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use dscm_core::{ErrorEnvelope, Location};
use dscm_schema::{load_document, SchemaValidator};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON Schema.
    #[arg(long)]
    pub schema: PathBuf,

    /// Path to the document (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub doc: PathBuf,

    /// Location recorded on every diagnostic.
    #[arg(long, default_value = "body")]
    pub loc: Location,

    /// Machine code recorded on every diagnostic.
    #[arg(long, default_value = "validation_failed")]
    pub code: String,
}

/// Validate the document. Returns whether it conforms.
pub fn run(args: &ValidateArgs, out: &mut dyn Write) -> anyhow::Result<bool> {
    let validator = SchemaValidator::from_file(&args.schema)
        .with_context(|| format!("loading schema {}", args.schema.display()))?;
    let doc = load_document(&args.doc)?;

    let envelope: ErrorEnvelope = validator
        .validate(&doc, args.loc, &args.code)
        .into_iter()
        .collect();
    tracing::info!(
        doc = %args.doc.display(),
        violations = envelope.len(),
        "document validated"
    );

    serde_json::to_writer_pretty(&mut *out, &envelope)?;
    writeln!(out)?;
    Ok(envelope.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SCHEMA: &str = r#"{
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": {"type": "string", "minLength": 1},
            "contact": {"type": "string", "format": "email"}
        }
    }"#;

    fn args(dir: &tempfile::TempDir, doc_name: &str, doc: &str) -> ValidateArgs {
        let schema = dir.path().join("schema.json");
        fs::write(&schema, SCHEMA).unwrap();
        let path = dir.path().join(doc_name);
        fs::write(&path, doc).unwrap();
        ValidateArgs {
            schema,
            doc: path,
            loc: Location::Body,
            code: "validation_failed".into(),
        }
    }

    #[test]
    fn conforming_yaml_prints_empty_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(&dir, "doc.yaml", "name: orders\ncontact: ops@example.com\n");
        let mut buf = Vec::new();
        assert!(run(&a, &mut buf).unwrap());
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v, serde_json::json!({"details": []}));
    }

    #[test]
    fn violations_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(&dir, "doc.json", r#"{"contact": "nope"}"#);
        let mut buf = Vec::new();
        assert!(!run(&a, &mut buf).unwrap());
        let env: ErrorEnvelope = serde_json::from_slice(&buf).unwrap();
        assert_eq!(env.len(), 2);
        assert!(env.iter().all(|e| e.code == "validation_failed"));
        assert!(env.iter().any(|e| e.field == "contact"));
    }

    #[test]
    fn missing_schema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(&dir, "doc.json", "{}");
        a.schema = dir.path().join("absent.json");
        let err = run(&a, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("loading schema"));
    }
}
