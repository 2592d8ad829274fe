//! # Usage Metering
//!
//! One [`UsageEntry`] is written per metered run: which product consumed
//! how much memory for how long, on behalf of which tenant.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dscm_core::{CustomMessage, ErrorCode, Location, ValidationError};

use crate::checks::{Checks, Validate};
use crate::status::RecordStatus;

/// A metered unit of compute consumption.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner_id: Option<String>,
    pub product_id: Uuid,
    pub memory_mb: i16,
    pub start_timestamp: Option<DateTime<Utc>>,
    pub end_timestamp: Option<DateTime<Utc>>,
    /// Billed duration in seconds.
    pub duration: f64,
    pub status: Option<RecordStatus>,
    #[serde(default)]
    pub metadata: Vec<HashMap<String, String>>,
    pub tags: Option<HashMap<String, String>>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: String,
}

fn end_before_start() -> CustomMessage {
    CustomMessage::new(
        "must be after start_timestamp",
        "må være etter start_timestamp",
    )
}

impl UsageEntry {
    /// Wall-clock span between start and end, when both are set.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        Some(self.end_timestamp? - self.start_timestamp?)
    }
}

impl Validate for UsageEntry {
    fn validate(&self, loc: Location, locale: &str) -> Vec<ValidationError> {
        let mut checks = Checks::new(loc, locale);

        checks.require("id", self.id.is_nil());
        checks.require("tenant_id", self.tenant_id.is_nil());
        checks.require("product_id", self.product_id.is_nil());
        if self.memory_mb <= 0 {
            checks.fail("memory_mb", ErrorCode::RequirePositiveInt);
        }
        let started = checks.require("start_timestamp", self.start_timestamp.is_none());
        let ended = checks.require("end_timestamp", self.end_timestamp.is_none());
        if started && ended && self.elapsed().is_some_and(|d| d <= chrono::Duration::zero()) {
            checks.fail_with("end_timestamp", ErrorCode::Invalid, &end_before_start());
        }
        // NaN fails this comparison, so it is reported too.
        checks.require("duration", !(self.duration > 0.0));
        checks.require("status", self.status.is_none());
        checks.require("tags", self.tags.is_none());
        checks.require("created_at", self.created_at.is_none());
        checks.require("created_by", self.created_by.is_empty());

        checks.finish()
    }
}
