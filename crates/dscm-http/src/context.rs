//! # Request Context
//!
//! Per-request correlation id and locale, extracted once at the edge and
//! threaded into every [`HttpError`] a handler builds.
//!
//! - Request id: the configured header when present and non-blank, else a
//!   fresh UUID v4. This is the only place an id is ever minted.
//! - Locale: the highest-weighted supported primary subtag in
//!   `Accept-Language` (`nb-NO` → `nb`, `no` → `nb`), else the configured
//!   default.

use std::error::Error;

use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use dscm_core::{ErrorCode, ErrorEnvelope, Locale};

use crate::config::BoundaryConfig;
use crate::error::HttpError;

/// Correlation id and locale for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
    pub locale: Locale,
}

impl RequestContext {
    /// Derive the context from request headers.
    pub fn from_headers(headers: &HeaderMap, config: &BoundaryConfig) -> Self {
        let request_id = headers
            .get(&config.request_id_header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let locale = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(negotiate_locale)
            .unwrap_or(config.default_locale);

        Self { request_id, locale }
    }

    /// Build the error for `code` in this request's id and locale.
    pub fn error(&self, code: ErrorCode, message: &str) -> HttpError {
        HttpError::from_code(self.request_id.as_str(), code, message, &[self.locale.as_str()])
    }

    /// A `validation_failed` error wrapping `envelope`.
    pub fn invalid(&self, envelope: ErrorEnvelope) -> HttpError {
        HttpError::from_envelope(self.request_id.as_str(), envelope, &[self.locale.as_str()])
    }

    /// Normalize any error for this request. See [`HttpError::from_any_error`].
    pub fn normalize<E>(&self, err: E) -> HttpError
    where
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        HttpError::from_any_error_locale(
            self.request_id.as_str(),
            Some(err),
            &[self.locale.as_str()],
        )
        .unwrap_or_else(|| self.error(ErrorCode::Internal, ""))
    }
}

/// Pick the best supported locale from an `Accept-Language` value.
///
/// Entries are ordered by q-weight (stable for ties); `q=0` entries are
/// refused. Unparseable weights count as `1`.
pub fn negotiate_locale(header: &str) -> Option<Locale> {
    let mut ranges: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let q = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((tag, q))
        })
        .filter(|(_, q)| *q > 0.0)
        .collect();
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranges.into_iter().find_map(|(tag, _)| {
        let primary = tag.split('-').next()?.to_ascii_lowercase();
        match primary.as_str() {
            "no" => Some(Locale::Nb),
            other => Locale::parse(other),
        }
    })
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<BoundaryConfig>()
            .cloned()
            .unwrap_or_default();
        Ok(Self::from_headers(&parts.headers, &config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(*v));
        }
        map
    }

    #[test]
    fn request_id_from_header() {
        let ctx = RequestContext::from_headers(
            &headers(&[("x-request-id", "abc-123")]),
            &BoundaryConfig::default(),
        );
        assert_eq!(ctx.request_id, "abc-123");
        assert_eq!(ctx.locale, Locale::En);
    }

    #[test]
    fn request_id_minted_when_absent() {
        let ctx = RequestContext::from_headers(&HeaderMap::new(), &BoundaryConfig::default());
        assert!(uuid::Uuid::parse_str(&ctx.request_id).is_ok());
        let blank = RequestContext::from_headers(
            &headers(&[("x-request-id", "  ")]),
            &BoundaryConfig::default(),
        );
        assert!(uuid::Uuid::parse_str(&blank.request_id).is_ok());
    }

    #[test]
    fn custom_request_id_header() {
        let cfg = BoundaryConfig {
            request_id_header: axum::http::HeaderName::from_static("x-correlation-id"),
            ..BoundaryConfig::default()
        };
        let ctx = RequestContext::from_headers(
            &headers(&[("x-request-id", "ignored"), ("x-correlation-id", "used")]),
            &cfg,
        );
        assert_eq!(ctx.request_id, "used");
    }

    #[test]
    fn accept_language_negotiation() {
        assert_eq!(negotiate_locale("nb-NO,nb;q=0.9,en;q=0.8"), Some(Locale::Nb));
        assert_eq!(negotiate_locale("fr-FR, en;q=0.5, nb;q=0.7"), Some(Locale::Nb));
        assert_eq!(negotiate_locale("no"), Some(Locale::Nb));
        assert_eq!(negotiate_locale("EN-us"), Some(Locale::En));
        assert_eq!(negotiate_locale("nb;q=0, en;q=0.1"), Some(Locale::En));
        assert_eq!(negotiate_locale("fr, de"), None);
        assert_eq!(negotiate_locale(""), None);
    }

    #[test]
    fn unsupported_language_uses_configured_default() {
        let cfg = BoundaryConfig {
            default_locale: Locale::Nb,
            ..BoundaryConfig::default()
        };
        let ctx = RequestContext::from_headers(&headers(&[("accept-language", "de-DE")]), &cfg);
        assert_eq!(ctx.locale, Locale::Nb);
    }

    #[test]
    fn errors_carry_context() {
        let ctx = RequestContext {
            request_id: "rid".into(),
            locale: Locale::Nb,
        };
        let err = ctx.error(ErrorCode::NotFound, "");
        assert_eq!(err.request_id, "rid");
        assert_eq!(err.message, "Forespurt ressurs ble ikke funnet.");
        let err = ctx.normalize("boom");
        assert_eq!(err.code, "internal_error");
        assert_eq!(err.message, "Noe gikk galt hos oss. Prøv igjen.");
    }

    #[tokio::test]
    async fn extractor_reads_config_from_extensions() {
        let mut req = axum::http::Request::builder()
            .header("x-trace", "t-1")
            .header("accept-language", "nb")
            .body(())
            .unwrap();
        req.extensions_mut().insert(BoundaryConfig {
            request_id_header: axum::http::HeaderName::from_static("x-trace"),
            ..BoundaryConfig::default()
        });
        let (mut parts, _) = req.into_parts();
        let ctx = RequestContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.request_id, "t-1");
        assert_eq!(ctx.locale, Locale::Nb);
    }
}
