//! Boundary configuration.
//!
//! Controls how a service derives the per-request locale and correlation id.
//! Defaults suit most services; override through environment variables.

use axum::http::HeaderName;
use dscm_core::Locale;

/// Default header carrying the caller's correlation id.
pub const DEFAULT_REQUEST_ID_HEADER: &str = "x-request-id";

/// Configuration for the service boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryConfig {
    /// Locale used when a request names no supported one.
    pub default_locale: Locale,
    /// Header carrying the caller-supplied correlation id.
    pub request_id_header: HeaderName,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            request_id_header: HeaderName::from_static(DEFAULT_REQUEST_ID_HEADER),
        }
    }
}

impl BoundaryConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DSCM_DEFAULT_LOCALE` (default: `en`; must be `en` or `nb`)
    /// - `DSCM_REQUEST_ID_HEADER` (default: `x-request-id`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`BoundaryConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_locale = match lookup("DSCM_DEFAULT_LOCALE") {
            Some(tag) if !tag.trim().is_empty() => {
                let tag = tag.trim().to_ascii_lowercase();
                Locale::parse(&tag).ok_or(ConfigError::UnsupportedLocale(tag))?
            }
            _ => defaults.default_locale,
        };

        let request_id_header = match lookup("DSCM_REQUEST_ID_HEADER") {
            Some(name) if !name.trim().is_empty() => HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|e| ConfigError::InvalidHeaderName(name.clone(), e.to_string()))?,
            _ => defaults.request_id_header,
        };

        Ok(Self {
            default_locale,
            request_id_header,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DSCM_DEFAULT_LOCALE {0:?} is not a supported locale (expected en or nb)")]
    UnsupportedLocale(String),
    #[error("invalid header name for DSCM_REQUEST_ID_HEADER {0:?}: {1}")]
    InvalidHeaderName(String, String),
}
