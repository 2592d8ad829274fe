//! # Record Status
//!
//! Lifecycle status carried by every core record. Six statuses exist;
//! `closed` is reserved for records outside the core lifecycle and is
//! rejected by [`crate::CoreModel`] validation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::ModelError;

/// Lifecycle status of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// In use.
    Active,
    /// Soft-deleted.
    Deleted,
    /// Temporarily disabled by an operator.
    Suspended,
    /// Refused during review.
    Rejected,
    /// Created but not yet activated.
    #[default]
    Draft,
    /// Permanently closed.
    Closed,
}

/// Total number of record statuses.
pub const RECORD_STATUS_COUNT: usize = 6;

impl RecordStatus {
    /// Returns every status in canonical order.
    pub fn all() -> &'static [RecordStatus] {
        &[
            Self::Active,
            Self::Deleted,
            Self::Suspended,
            Self::Rejected,
            Self::Draft,
            Self::Closed,
        ]
    }

    /// Wire identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
            Self::Suspended => "suspended",
            Self::Rejected => "rejected",
            Self::Draft => "draft",
            Self::Closed => "closed",
        }
    }

    /// Whether a core record may carry this status.
    pub fn is_core_lifecycle(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ModelError::unknown("record status", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_all() {
        assert_eq!(RecordStatus::all().len(), RECORD_STATUS_COUNT);
    }

    #[test]
    fn serde_matches_as_str() {
        for status in RecordStatus::all() {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: RecordStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, status);
        }
    }

    #[test]
    fn from_str_round_trips_and_rejects_unknown() {
        for status in RecordStatus::all() {
            assert_eq!(status.as_str().parse::<RecordStatus>().unwrap(), *status);
        }
        let err = "archived".parse::<RecordStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown record status: \"archived\"");
    }

    #[test]
    fn only_closed_is_outside_core_lifecycle() {
        let outside: Vec<_> = RecordStatus::all()
            .iter()
            .filter(|s| !s.is_core_lifecycle())
            .collect();
        assert_eq!(outside, vec![&RecordStatus::Closed]);
    }

    #[test]
    fn default_is_draft() {
        assert_eq!(RecordStatus::default(), RecordStatus::Draft);
    }
}
