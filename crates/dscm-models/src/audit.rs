//! # Audit Trail
//!
//! [`AuditEntry`] records one state-changing API call: who made it (from
//! the bearer token), what it touched, and which service handled it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use dscm_core::{Location, ValidationError};

use crate::checks::{Checks, Validate};

/// One audited API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    // Identity, from the bearer token or request context.
    pub tenant_id: Uuid,
    /// Token `sub` claim.
    pub subject: String,
    /// Token `jti` claim.
    #[serde(default)]
    pub jti: Uuid,

    // Operation.
    /// `POST`, `PATCH`, ...
    pub http_method: String,
    /// Resource kind, e.g. `target`.
    pub resource: String,
    #[serde(default)]
    pub resource_id: Uuid,
    /// Partial or full resource state.
    #[serde(default)]
    pub payload: Value,

    // Request context.
    #[serde(default)]
    pub source_ip: String,
    #[serde(default)]
    pub user_agent: String,
    pub timestamp: Option<DateTime<Utc>>,

    // Originating API.
    #[serde(default)]
    pub service: String,
    /// Route template, e.g. `/v1/targets/{id}`.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub full_url: String,
    /// Request id of the audited call.
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub correlation_id: String,
}

impl Validate for AuditEntry {
    fn validate(&self, loc: Location, locale: &str) -> Vec<ValidationError> {
        let mut checks = Checks::new(loc, locale);
        checks.require("subject", self.subject.is_empty());
        checks.require("tenant_id", self.tenant_id.is_nil());
        checks.require("http_method", self.http_method.is_empty());
        checks.require("resource", self.resource.is_empty());
        checks.require("timestamp", self.timestamp.is_none());
        checks.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_entry_from_json_is_valid() {
        let entry: AuditEntry = serde_json::from_value(json!({
            "tenant_id": "3a2b1c0d-9e8f-4a7b-8c6d-5e4f3a2b1c0d",
            "subject": "alice@example.com",
            "http_method": "PATCH",
            "resource": "target",
            "timestamp": "2025-03-01T12:00:00Z"
        }))
        .unwrap();
        assert!(entry.validate(Location::Body, "en").is_empty());
        assert!(entry.payload.is_null());
        assert!(entry.resource_id.is_nil());
    }

    #[test]
    fn only_identity_operation_and_time_are_required() {
        let errs = AuditEntry::default().validate(Location::Body, "en");
        let fields: Vec<_> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["subject", "tenant_id", "http_method", "resource", "timestamp"]
        );
    }
}
