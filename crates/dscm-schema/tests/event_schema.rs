//! Integration test: validate event documents against the shared event
//! schema and check the reshaped diagnostics clients would receive.

use std::path::PathBuf;

use dscm_core::{Location, NONE_FIELD_ERROR};
use dscm_schema::{load_document, validate_against_schema, SchemaValidator};
use serde_json::{json, Value};

const EVENT_SCHEMA: &[u8] = include_bytes!("fixtures/event.schema.json");

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn valid_event() -> Value {
    json!({
        "id": "6f1c1f8e-3c55-4a4e-9c61-7f3a0b9d2e10",
        "session_id": "0b6a6f52-0f8e-4d47-8a3e-2b7b1a6f9c01",
        "request_id": "9d1e6c8b-5a4f-4b3e-8d2c-1a0f9e8d7c6b",
        "tenant_id": "3a2b1c0d-9e8f-4a7b-8c6d-5e4f3a2b1c0d",
        "event_type": "dataset.created",
        "event_source": "ingest",
        "payload": { "rows": 42 },
        "timestamp": "2025-03-01T12:00:00Z",
        "created_by": "ingest@example.com",
        "md5_hash": "d41d8cd98f00b204e9800998ecf8427e"
    })
}

fn validator() -> SchemaValidator {
    SchemaValidator::from_slice(EVENT_SCHEMA).expect("event schema compiles")
}

#[test]
fn valid_event_passes() {
    let doc = serde_json::to_vec(&valid_event()).unwrap();
    let errs = validate_against_schema(&doc, EVENT_SCHEMA, Location::Body, "validation_failed");
    assert!(errs.is_empty(), "{errs:?}");
}

#[test]
fn missing_payload_and_uri_is_document_level() {
    let mut doc = valid_event();
    doc.as_object_mut().unwrap().remove("payload");
    let errs = validator().validate(&doc, Location::Body, "validation_failed");
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert_eq!(errs[0].field, NONE_FIELD_ERROR);
    assert!(errs[0].message.starts_with("(anyOf): "), "{}", errs[0].message);
}

#[test]
fn empty_payload_reports_min_properties() {
    let mut doc = valid_event();
    doc["payload"] = json!({});
    let errs = validator().validate(&doc, Location::Body, "validation_failed");
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert_eq!(errs[0].field, "payload");
    assert!(errs[0].message.starts_with("(minProperties): "));
}

#[test]
fn each_bad_field_is_reported() {
    let mut doc = valid_event();
    doc["created_by"] = json!("ingest-at-example.com");
    doc["md5_hash"] = json!("xyz");
    doc["event_source_uri"] = json!("not a uri");
    doc["tags"] = json!({"env": 1});
    let errs = validator().validate(&doc, Location::Body, "validation_failed");

    let find = |field: &str| errs.iter().find(|e| e.field == field);
    assert!(find("created_by").is_some_and(|e| e.message.starts_with("(format): ")));
    assert!(find("md5_hash").is_some_and(|e| e.message.starts_with("(pattern): ")));
    assert!(find("event_source_uri").is_some_and(|e| e.message.starts_with("(format): ")));
    assert!(find("tags.env").is_some_and(|e| e.message.starts_with("(type): ")));
    assert!(errs.iter().all(|e| e.code == "validation_failed" && e.loc == Location::Body));
}

#[test]
fn unknown_property_is_rejected() {
    let mut doc = valid_event();
    doc["extra"] = json!(true);
    let errs = validator().validate(&doc, Location::Body, "");
    assert_eq!(errs.len(), 1, "{errs:?}");
    assert!(errs[0].message.starts_with("(additionalProperties): "));
}

#[test]
fn yaml_document_validates() {
    let doc = load_document(&fixture("event.yaml")).unwrap();
    assert!(validator().is_valid(&doc));
}

#[test]
fn schema_file_loads() {
    let v = SchemaValidator::from_file(&fixture("event.schema.json")).unwrap();
    assert!(v.is_valid(&valid_event()));
}

#[test]
fn missing_document_is_load_error() {
    let err = load_document(&fixture("does-not-exist.json")).unwrap_err();
    assert!(err.to_string().contains("cannot read file"));
}
