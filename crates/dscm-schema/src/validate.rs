//! # Schema Validation
//!
//! Validates JSON/YAML documents against JSON Schema definitions
//! (Draft 2020-12, formats asserted) and reshapes every violation into a
//! [`ValidationError`] so schema failures look like any other field
//! failure to clients.
//!
//! ## Reshaping Rules
//!
//! - valid document: empty list;
//! - one entry per violation, `field` = dotted instance path
//!   (`/metadata/0/key` → `metadata.0.key`), root → [`NONE_FIELD_ERROR`];
//! - `message` = `"(<keyword>): <description>"`, keyword taken from the
//!   schema path (`minProperties`, `required`, `format`, ...);
//! - schema or document that cannot be processed: a single
//!   [`NONE_FIELD_ERROR`] entry `"schema validator error: ..."`.
//!
//! `loc` and `code` are supplied by the caller and copied onto every entry.

use std::path::Path;

use dscm_core::{Location, ValidationError, NONE_FIELD_ERROR};
use jsonschema::Validator;
use serde_json::Value;

use crate::error::SchemaError;

/// Prefix of the message reported when validation cannot run.
pub const VALIDATOR_ERROR_PREFIX: &str = "schema validator error: ";

/// A compiled schema, built once and reused for many documents.
///
/// `Send + Sync`; share it across request handlers.
pub struct SchemaValidator {
    validator: Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile a parsed schema.
    pub fn new(schema: &Value) -> Result<Self, SchemaError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.should_validate_formats(true);
        let validator = opts.build(schema).map_err(|e| {
            tracing::warn!(error = %e, "schema cannot be compiled");
            SchemaError::SchemaBuild(e.to_string())
        })?;
        Ok(Self { validator })
    }

    /// Parse and compile schema bytes.
    pub fn from_slice(schema: &[u8]) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_slice(schema).map_err(|e| {
            tracing::warn!(error = %e, "schema is not valid JSON");
            SchemaError::SchemaParse(e)
        })?;
        Self::new(&value)
    }

    /// Load and compile a schema file (`.json`, `.yaml` or `.yml`).
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let value = load_document(path)?;
        Self::new(&value)
    }

    /// Whether `instance` satisfies the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Every violation of the schema by `instance`, in validator order.
    pub fn validate(&self, instance: &Value, loc: Location, code: &str) -> Vec<ValidationError> {
        self.validator
            .iter_errors(instance)
            .map(|e| {
                let keyword = schema_keyword(&e.schema_path.to_string());
                ValidationError::new(
                    pointer_to_field(&e.instance_path.to_string()),
                    format!("({keyword}): {e}"),
                    loc,
                    code,
                )
            })
            .collect()
    }

    /// Parse `doc` as JSON and validate it.
    ///
    /// Unparseable bytes yield a single validator-error entry.
    pub fn validate_bytes(&self, doc: &[u8], loc: Location, code: &str) -> Vec<ValidationError> {
        match serde_json::from_slice::<Value>(doc) {
            Ok(instance) => self.validate(&instance, loc, code),
            Err(e) => vec![validator_error(&e, loc, code)],
        }
    }
}

/// Validate JSON document bytes against JSON Schema bytes.
///
/// One-shot form of [`SchemaValidator`]; compile once with
/// [`SchemaValidator::from_slice`] when validating many documents.
pub fn validate_against_schema(
    doc: &[u8],
    schema: &[u8],
    loc: Location,
    code: &str,
) -> Vec<ValidationError> {
    match SchemaValidator::from_slice(schema) {
        Ok(validator) => validator.validate_bytes(doc, loc, code),
        Err(e) => vec![validator_error(&e, loc, code)],
    }
}

fn validator_error(err: &dyn std::fmt::Display, loc: Location, code: &str) -> ValidationError {
    ValidationError::document(format!("{VALIDATOR_ERROR_PREFIX}{err}"), loc, code)
}

/// JSON Schema keyword that produced a violation, from its schema path.
///
/// The last non-index segment of the path: `/properties/body/minProperties`
/// → `minProperties`, `/anyOf` → `anyOf`, `/items/type` → `type`.
pub fn schema_keyword(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .find(|seg| !seg.is_empty() && !seg.bytes().all(|b| b.is_ascii_digit()))
        .map(unescape_pointer_segment)
        .unwrap_or_else(|| "schema".to_string())
}

/// Dotted field path for a JSON Pointer; the root maps to [`NONE_FIELD_ERROR`].
pub fn pointer_to_field(pointer: &str) -> String {
    let segments: Vec<String> = pointer
        .split('/')
        .filter(|seg| !seg.is_empty())
        .map(unescape_pointer_segment)
        .collect();
    if segments.is_empty() {
        NONE_FIELD_ERROR.to_string()
    } else {
        segments.join(".")
    }
}

fn unescape_pointer_segment(seg: &str) -> String {
    seg.replace("~1", "/").replace("~0", "~")
}

/// Load a JSON or YAML document from disk as a JSON value.
///
/// The format follows the extension: `.yaml`/`.yml` is YAML, anything else
/// is JSON.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "yaml" | "yml" => {
            let yaml_value: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| SchemaError::DocumentLoad {
                    path: path.display().to_string(),
                    reason: format!("invalid YAML: {e}"),
                })?;
            yaml_to_json_value(&yaml_value).map_err(|e| SchemaError::DocumentLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        }
        _ => serde_json::from_str(&content).map_err(|e| SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

/// Convert a parsed YAML tree into the JSON value the validator consumes.
///
/// Tags are dropped. Scalar map keys are stringified; sequence or mapping
/// keys and non-finite floats are rejected with the dotted path of the
/// offending node, in the same field notation as [`pointer_to_field`].
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, SchemaError> {
    let mut path = Vec::new();
    yaml_node(yaml, &mut path)
}

fn yaml_node(node: &serde_yaml::Value, path: &mut Vec<String>) -> Result<Value, SchemaError> {
    use serde_yaml::Value as Yaml;

    let unrepresentable = |path: &[String], reason: String| SchemaError::YamlConversion {
        field: dotted(path),
        reason,
    };

    Ok(match node {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.into(),
            (None, Some(u), _) => u.into(),
            (None, None, Some(f)) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| unrepresentable(path, format!("{f} has no JSON form")))?,
            _ => return Err(unrepresentable(path, format!("unsupported number {n}"))),
        },
        Yaml::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push(i.to_string());
                out.push(yaml_node(item, path)?);
                path.pop();
            }
            Value::Array(out)
        }
        Yaml::Mapping(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    Yaml::String(s) => s.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Null => "null".to_string(),
                    _ => return Err(unrepresentable(path, "map key is not a scalar".into())),
                };
                path.push(key);
                let converted = yaml_node(value, path)?;
                if let Some(key) = path.pop() {
                    out.insert(key, converted);
                }
            }
            Value::Object(out)
        }
        Yaml::Tagged(tagged) => yaml_node(&tagged.value, path)?,
    })
}

fn dotted(path: &[String]) -> String {
    if path.is_empty() {
        NONE_FIELD_ERROR.to_string()
    } else {
        path.join(".")
    }
}
