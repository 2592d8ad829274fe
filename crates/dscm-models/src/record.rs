//! # Core Record
//!
//! [`CoreModel`] carries the identity, tenancy, audit and free-form
//! attribute fields every persisted entity shares. Services embed it in
//! their own records and call the lifecycle methods from the service layer:
//!
//! - [`CoreModel::create`] once, before the first insert, with the
//!   authenticated subject and issuer.
//! - [`CoreModel::touch`] before every update.
//! - [`CoreModel::apply_create_defaults`] / [`CoreModel::apply_update_defaults`]
//!   from the persistence layer's pre-insert / pre-update hooks, which have
//!   no subject context.
//!
//! Callers pass `now` explicitly so tests can pin the clock.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dscm_core::{is_email_format, ErrorCode, Jsonb, Location, ValidationError};

use crate::checks::{invalid_json_structure, Checks, Validate};
use crate::status::RecordStatus;

/// Tag key recording the owning tenant.
pub const TENANT_TAG: &str = "tenant_id";

/// Free-form string attributes stored as one JSON column.
pub type Attributes = Jsonb<HashMap<String, String>>;

/// Fields shared by every persisted entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreModel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub issuer: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub metadata: Attributes,
    #[serde(default)]
    pub tags: Attributes,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub modified_by: String,
}

impl CoreModel {
    /// Apply create-time identity and audit fields.
    ///
    /// Mints an id when none is set, scopes the record to `tenant_id`,
    /// stamps creation and modification with `subject` at `now`, and adds
    /// the `tenant_id` tag unless one is already present.
    pub fn create(&mut self, subject: &str, issuer: &str, tenant_id: Uuid, now: DateTime<Utc>) {
        if self.id.is_nil() {
            self.id = Uuid::new_v4();
        }
        self.tenant_id = tenant_id;
        self.issuer = issuer.to_string();
        self.created_at = Some(now);
        self.created_by = subject.to_string();
        self.touch(subject, now);
        self.tags
            .entry(TENANT_TAG.to_string())
            .or_insert_with(|| tenant_id.to_string());
    }

    /// Stamp a modification by `subject` at `now`.
    pub fn touch(&mut self, subject: &str, now: DateTime<Utc>) {
        self.modified_at = Some(now);
        self.modified_by = subject.to_string();
    }

    /// Pre-insert defaults that need no subject: id, timestamps and the
    /// tenant tag. Audit subjects are left untouched.
    pub fn apply_create_defaults(&mut self, now: DateTime<Utc>) {
        if self.id.is_nil() {
            self.id = Uuid::new_v4();
        }
        let created = *self.created_at.get_or_insert(now);
        self.modified_at.get_or_insert(created);
        if !self.tenant_id.is_nil() {
            let tenant = self.tenant_id.to_string();
            self.tags.entry(TENANT_TAG.to_string()).or_insert(tenant);
        }
    }

    /// Pre-update default: refresh the modification time.
    pub fn apply_update_defaults(&mut self, now: DateTime<Utc>) {
        self.modified_at = Some(now);
    }
}

impl Validate for CoreModel {
    fn validate(&self, loc: Location, locale: &str) -> Vec<ValidationError> {
        let mut checks = Checks::new(loc, locale);

        checks.require("id", self.id.is_nil());
        checks.require("tenant_id", self.tenant_id.is_nil());
        checks.require("name", self.name.is_empty());
        for (field, subject) in [
            ("created_by", &self.created_by),
            ("modified_by", &self.modified_by),
        ] {
            if checks.require(field, subject.is_empty()) && !is_email_format(subject) {
                checks.fail(field, ErrorCode::InvalidEmailFormat);
            }
        }
        checks.require("created_at", self.created_at.is_none());
        checks.require("modified_at", self.modified_at.is_none());

        if !self.status.is_core_lifecycle() {
            checks.fail_args("status", ErrorCode::InvalidStatus, &[&self.status]);
        }

        for (field, attrs) in [("metadata", &self.metadata), ("tags", &self.tags)] {
            if attrs.validate().is_err() {
                checks.fail_with(field, ErrorCode::InvalidJsonFormat, &invalid_json_structure());
            }
        }

        checks.finish()
    }
}
