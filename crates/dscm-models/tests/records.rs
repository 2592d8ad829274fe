//! Integration test: a service record embedding [`CoreModel`] goes through
//! create, JSON transport and update, and its violations surface as an
//! error envelope that survives error wrapping.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use dscm_core::{as_validation_failure, CoreError, Location, ValidationError};
use dscm_models::page::PageResponse;
use dscm_models::{CoreModel, RecordStatus, TriggerType, Validate, TENANT_TAG};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Schedule {
    #[serde(flatten)]
    core: CoreModel,
    trigger: Option<TriggerType>,
    cron: String,
}

impl Validate for Schedule {
    fn validate(&self, loc: Location, locale: &str) -> Vec<ValidationError> {
        let mut errs = self.core.validate(loc, locale);
        let mut checks = dscm_models::Checks::new(loc, locale);
        checks.require("trigger", self.trigger.is_none());
        if self.trigger == Some(TriggerType::Schedule) {
            checks.require("cron", self.cron.is_empty());
        }
        errs.extend(checks.finish());
        errs
    }
}

fn tenant() -> Uuid {
    Uuid::parse_str("3a2b1c0d-9e8f-4a7b-8c6d-5e4f3a2b1c0d").unwrap()
}

#[test]
fn created_record_travels_as_flat_json() {
    let mut s = Schedule {
        core: CoreModel {
            name: "nightly".into(),
            status: RecordStatus::Active,
            ..CoreModel::default()
        },
        trigger: Some(TriggerType::Schedule),
        cron: "0 2 * * *".into(),
    };
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 2, 0, 0).unwrap();
    s.core.create("ops@example.com", "idp", tenant(), now);
    assert!(s.validate(Location::Body, "en").is_empty());

    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["name"], "nightly");
    assert_eq!(json["trigger"], "schedule");
    assert_eq!(json["status"], "active");
    assert_eq!(json["tags"][TENANT_TAG], tenant().to_string());

    let back: Schedule = serde_json::from_value(json).unwrap();
    assert_eq!(back.core, s.core);
}

#[test]
fn violations_from_core_and_record_are_merged() {
    let s = Schedule {
        trigger: Some(TriggerType::Schedule),
        ..Schedule::default()
    };
    let errs = s.validate(Location::Body, "en");
    assert_eq!(errs.first().map(|e| e.field.as_str()), Some("id"));
    assert_eq!(errs.last().map(|e| e.field.as_str()), Some("cron"));
}

#[test]
fn envelope_survives_wrapping() {
    #[derive(Debug, thiserror::Error)]
    #[error("saving schedule")]
    struct SaveError(#[source] CoreError);

    let err = Schedule::default()
        .ensure_valid(Location::Body, "nb")
        .map_err(SaveError)
        .unwrap_err();
    let env = as_validation_failure(&err).expect("envelope in chain");
    assert!(env.iter().any(|e| e.field == "trigger" && e.message == "trigger er påkrevd."));
}

#[test]
fn page_of_records() {
    let rows: Vec<_> = (0..3)
        .map(|i| json!({ "name": format!("s{i}") }))
        .collect();
    let resp = PageResponse::new(rows, 23, 3, 10);
    assert_eq!(resp.page.page, 3);
    assert!(!resp.page.has_next);
    assert_eq!(resp.page.offset(), 20);
}
