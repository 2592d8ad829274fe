//! Service version report.

use serde::{Deserialize, Serialize};

use dscm_core::{Location, ValidationError};

use crate::checks::{Checks, Validate};

/// Body of a service's version endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}

impl VersionInfo {
    /// Version of the crate this is compiled into.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Validate for VersionInfo {
    fn validate(&self, loc: Location, locale: &str) -> Vec<ValidationError> {
        let mut checks = Checks::new(loc, locale);
        checks.require("version", self.version.is_empty());
        checks.finish()
    }
}
