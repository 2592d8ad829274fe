//! # Stream Events
//!
//! [`Event`] is the envelope every producer publishes to the event stream.
//! Its content travels either inline (`payload`) or by reference
//! (`payload_uri`); at least one must be present. Processing hints for
//! consumers travel the same way through `context` / `context_uri`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use dscm_core::{
    is_email_format, is_md5_hex, validate_uri, CustomMessage, ErrorCode, Jsonb, Location,
    ValidationError,
};

use crate::checks::{invalid_json_structure, invalid_uri, Checks, Validate};
use crate::record::Attributes;

/// Inline JSON object carried by an event.
pub type JsonObject = Jsonb<Map<String, Value>>;

/// A message published to the event stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub session_id: Uuid,
    pub request_id: Uuid,
    pub tenant_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub event_type: String,
    pub event_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_source_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_entity_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The referenced domain object, inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<JsonObject>,
    /// The referenced domain object, by location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_uri: Option<String>,
    #[serde(default)]
    pub metadata: Attributes,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub tags: Attributes,
    pub timestamp: Option<DateTime<Utc>>,
    pub created_by: String,
    pub md5_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_uri: Option<String>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn payload_missing() -> CustomMessage {
    CustomMessage::new(
        "payload and payload_uri cannot both be empty",
        "payload og payload_uri kan ikke begge være tomme",
    )
}

fn empty_when_provided() -> CustomMessage {
    CustomMessage::new("cannot be empty when provided", "kan ikke være tom når oppgitt")
}

fn bad_md5() -> CustomMessage {
    CustomMessage::new("must be a 32-char hex MD5", "må være en MD5 på 32 heksadesimale tegn")
}

impl Event {
    /// Whether the event carries content inline or by reference.
    pub fn has_payload(&self) -> bool {
        let inline = self.payload.as_ref().is_some_and(|p| !p.is_empty());
        inline || !is_blank(self.payload_uri.as_deref())
    }
}

impl Validate for Event {
    fn validate(&self, loc: Location, locale: &str) -> Vec<ValidationError> {
        let mut checks = Checks::new(loc, locale);

        checks.require("id", self.id.is_nil());
        checks.require("session_id", self.session_id.is_nil());
        checks.require("request_id", self.request_id.is_nil());
        checks.require("tenant_id", self.tenant_id.is_nil());
        checks.require("event_type", self.event_type.is_empty());
        checks.require("event_source", self.event_source.is_empty());

        if !self.has_payload() {
            let message = payload_missing();
            checks.fail_with("payload", ErrorCode::Required, &message);
            checks.fail_with("payload_uri", ErrorCode::Required, &message);
        }

        for (field, uri) in [
            ("event_source_uri", &self.event_source_uri),
            ("affected_entity_uri", &self.affected_entity_uri),
            ("payload_uri", &self.payload_uri),
            ("context_uri", &self.context_uri),
        ] {
            let Some(raw) = uri.as_deref() else { continue };
            if let Err(ErrorCode::Invalid) = validate_uri(raw) {
                checks.fail_with(field, ErrorCode::Invalid, &invalid_uri());
            }
        }

        checks.require("timestamp", self.timestamp.is_none());
        if checks.require("created_by", self.created_by.is_empty())
            && !is_email_format(&self.created_by)
        {
            checks.fail("created_by", ErrorCode::InvalidEmailFormat);
        }
        if self.owner_id.is_some() && is_blank(self.owner_id.as_deref()) {
            checks.fail_with("owner_id", ErrorCode::Required, &empty_when_provided());
        }
        if !is_md5_hex(&self.md5_hash) {
            checks.fail_with("md5_hash", ErrorCode::Invalid, &bad_md5());
        }

        let boxes = [
            ("payload", self.payload.as_ref().map(|p| p.validate())),
            ("tags", Some(self.tags.validate())),
            ("metadata", Some(self.metadata.validate())),
            ("context", self.context.as_ref().map(|c| c.validate())),
        ];
        for (field, outcome) in boxes {
            if let Some(Err(_)) = outcome {
                checks.fail_with(field, ErrorCode::InvalidJsonFormat, &invalid_json_structure());
            }
        }

        checks.finish()
    }
}
