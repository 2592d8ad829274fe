//! # Boundary Error
//!
//! [`HttpError`] is the single error shape a service shows its external
//! callers. It is built once, near the failure, through a named constructor
//! per error category, optionally decorated with a retry hint or a wrapped
//! cause, and consumed exactly once at the service edge.
//!
//! ## Wire Shape
//!
//! ```json
//! { "code": "too_many_requests", "message": "Too many requests. Please slow down.",
//!   "request_id": "3c640e85-75b3-4e0b-84c3-1b8427a64e23",
//!   "recoverable": true, "retry_after": 60 }
//! ```
//!
//! The wrapped cause and the status override are never serialized. The
//! cause stays reachable through `std::error::Error::source`, so an
//! [`ErrorEnvelope`] attached with [`HttpError::with_cause`] is still found by
//! [`dscm_core::as_validation_failure`].
//!
//! ## Invariants
//!
//! - `request_id` is always supplied by the caller; this type never mints one.
//! - `recoverable == (retry_after > 0)` after any constructor or
//!   [`HttpError::with_retry`] call.
//! - [`HttpError::response`] emits `Retry-After` iff `retry_after > 0` and
//!   never mutates the error.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use dscm_core::{
    get_locale, human_message_locale, status_for, ErrorCode, ErrorEnvelope, StatusClass,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// Canonical error returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HttpError {
    /// Stable machine code, e.g. `"not_found"`.
    pub code: String,
    /// Human-readable description, safe to show clients.
    pub message: String,
    /// Caller-supplied correlation id.
    pub request_id: String,
    /// Whether the client may retry after `retry_after` seconds.
    pub recoverable: bool,
    /// Seconds the client should wait before retrying; `0` when not retryable.
    pub retry_after: i64,

    #[serde(skip)]
    cause: Option<Cause>,
    #[serde(skip)]
    status: Option<u16>,
}

impl HttpError {
    /// Build an error from its parts.
    ///
    /// `status` overrides the status table; pass `None` to derive it from
    /// `code`. Prefer the named constructors.
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            request_id: request_id.into(),
            recoverable: false,
            retry_after: 0,
            cause: None,
            status,
        }
    }

    /// Build the error for `code`.
    ///
    /// An empty `message` is replaced by the catalog text for `code` in the
    /// first non-empty locale of `locales` (default `"en"`). Codes that are
    /// conventionally retryable get their default retry hint.
    pub fn from_code(
        request_id: impl Into<String>,
        code: ErrorCode,
        message: &str,
        locales: &[&str],
    ) -> Self {
        let message = if message.is_empty() {
            human_message_locale(get_locale(locales), code, &[])
        } else {
            message.to_string()
        };
        Self::new(request_id, code.as_str(), message, None).with_retry(code.default_retry_after())
    }

    /// Set the retry hint; `recoverable` becomes `seconds > 0`.
    pub fn with_retry(mut self, seconds: i64) -> Self {
        self.retry_after = seconds;
        self.recoverable = seconds > 0;
        self
    }

    /// Attach the originating error. Code, message and status are unchanged.
    pub fn with_cause(mut self, cause: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        self.cause = Some(Arc::from(cause.into()));
        self
    }

    /// The wrapped originating error, if any.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Transport status: the explicit override, else the status table entry for `code`.
    pub fn status(&self) -> u16 {
        self.status.unwrap_or_else(|| status_for(&self.code))
    }

    /// [`HttpError::status`] as an [`axum::http::StatusCode`].
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Transport-ready triple: status, headers, body.
    ///
    /// Headers carry `Retry-After` iff `retry_after > 0`.
    pub fn response(&self) -> (StatusCode, HeaderMap, &HttpError) {
        let mut headers = HeaderMap::new();
        if self.retry_after > 0 {
            headers.insert(RETRY_AFTER, HeaderValue::from(self.retry_after));
        }
        (self.status_code(), headers, self)
    }

    /// The `HttpError` carried by `err` or anything in its `source()` chain.
    pub fn from_error<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a HttpError> {
        std::iter::successors(Some(err), |&e| e.source())
            .find_map(|e| e.downcast_ref::<HttpError>())
    }

    /// Normalize an arbitrary error into an `HttpError`.
    ///
    /// An `HttpError` found in the chain is returned unchanged, keeping its own
    /// request id. Anything else becomes an `internal_error` wrapping `err` as
    /// its cause. `None` in, `None` out.
    pub fn from_any_error<E>(request_id: impl Into<String>, err: Option<E>) -> Option<HttpError>
    where
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        Self::from_any_error_locale(request_id, err, &[])
    }

    /// [`HttpError::from_any_error`] with the internal-error message resolved
    /// in the first non-empty locale of `locales`.
    pub fn from_any_error_locale<E>(
        request_id: impl Into<String>,
        err: Option<E>,
        locales: &[&str],
    ) -> Option<HttpError>
    where
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        let boxed: Box<dyn Error + Send + Sync + 'static> = err?.into();
        let boxed = match boxed.downcast::<HttpError>() {
            Ok(found) => return Some(*found),
            Err(other) => other,
        };
        if let Some(found) = Self::from_error(&*boxed) {
            return Some(found.clone());
        }
        tracing::debug!(error = %boxed, "wrapping opaque error as internal_error");
        Some(Self::internal(request_id, "", locales).with_cause(boxed))
    }

    /// A `validation_failed` error carrying `envelope` as its cause.
    pub fn from_envelope(
        request_id: impl Into<String>,
        envelope: ErrorEnvelope,
        locales: &[&str],
    ) -> Self {
        Self::validation_failed(request_id, "", locales).with_cause(envelope)
    }
}

macro_rules! named_constructors {
    ($($(#[$doc:meta])* $name:ident => $code:ident;)+) => {
        /// Named constructors, one per error category.
        ///
        /// Each takes the caller's request id, an optional message (`""` for
        /// the catalog default) and an ordered list of locale tags.
        impl HttpError {
            $(
                $(#[$doc])*
                pub fn $name(
                    request_id: impl Into<String>,
                    message: &str,
                    locales: &[&str],
                ) -> Self {
                    Self::from_code(request_id, ErrorCode::$code, message, locales)
                }
            )+
        }
    };
}

named_constructors! {
    /// `internal_error` (500).
    internal => Internal;
    /// `unauthorized` (401).
    unauthorized => Unauthorized;
    /// `forbidden` (403).
    forbidden => Forbidden;
    /// `not_found` (404).
    not_found => NotFound;
    /// `conflict` (409).
    conflict => Conflict;
    /// `bad_request` (400).
    bad_request => BadRequest;
    /// `validation_failed` (422).
    validation_failed => ValidationFailed;
    /// `too_many_requests` (429).
    too_many_requests => TooManyRequests;
    /// `bad_gateway` (502).
    bad_gateway => BadGateway;
    /// `ok` (200).
    ok => Ok;
    /// `created` (201).
    created => Created;
    /// `accepted` (202).
    accepted => Accepted;
    /// `non_authoritative_info` (203).
    non_authoritative_info => NonAuthoritativeInfo;
    /// `no_content` (204).
    no_content => NoContent;
    /// `reset_content` (205).
    reset_content => ResetContent;
    /// `partial_content` (206).
    partial_content => PartialContent;
    /// `multi_status` (207).
    multi_status => MultiStatus;
    /// `already_reported` (208).
    already_reported => AlreadyReported;
    /// `im_used` (226).
    im_used => ImUsed;
    /// `multiple_choices` (300).
    multiple_choices => MultipleChoices;
    /// `moved_permanently` (301).
    moved_permanently => MovedPermanently;
    /// `found` (302).
    found => Found;
    /// `see_other` (303).
    see_other => SeeOther;
    /// `not_modified` (304).
    not_modified => NotModified;
    /// `use_proxy` (305).
    use_proxy => UseProxy;
    /// `unused` (306).
    unused => Unused;
    /// `temporary_redirect` (307).
    temporary_redirect => TemporaryRedirect;
    /// `permanent_redirect` (308).
    permanent_redirect => PermanentRedirect;
    /// `payment_required` (402).
    payment_required => PaymentRequired;
    /// `method_not_allowed` (405).
    method_not_allowed => MethodNotAllowed;
    /// `not_acceptable` (406).
    not_acceptable => NotAcceptable;
    /// `proxy_auth_required` (407).
    proxy_auth_required => ProxyAuthRequired;
    /// `request_timeout` (408).
    request_timeout => RequestTimeout;
    /// `gone` (410).
    gone => Gone;
    /// `length_required` (411).
    length_required => LengthRequired;
    /// `precondition_failed` (412).
    precondition_failed => PreconditionFailed;
    /// `content_too_large` (413).
    content_too_large => ContentTooLarge;
    /// `uri_too_long` (414).
    uri_too_long => UriTooLong;
    /// `unsupported_media_type` (415).
    unsupported_media_type => UnsupportedMediaType;
    /// `range_not_satisfiable` (416).
    range_not_satisfiable => RangeNotSatisfiable;
    /// `expectation_failed` (417).
    expectation_failed => ExpectationFailed;
    /// `im_a_teapot` (418).
    im_a_teapot => ImATeapot;
    /// `misdirected_request` (421).
    misdirected_request => MisdirectedRequest;
    /// `unprocessable_content` (422).
    unprocessable_content => UnprocessableContent;
    /// `locked` (423).
    locked => Locked;
    /// `failed_dependency` (424).
    failed_dependency => FailedDependency;
    /// `too_early` (425).
    too_early => TooEarly;
    /// `upgrade_required` (426).
    upgrade_required => UpgradeRequired;
    /// `precondition_required` (428).
    precondition_required => PreconditionRequired;
    /// `request_header_fields_too_large` (431).
    request_header_fields_too_large => RequestHeaderFieldsTooLarge;
    /// `unavailable_for_legal_reasons` (451).
    unavailable_for_legal_reasons => UnavailableForLegalReasons;
    /// `not_implemented` (501).
    not_implemented => NotImplemented;
    /// `service_unavailable` (503).
    service_unavailable => ServiceUnavailable;
    /// `gateway_timeout` (504).
    gateway_timeout => GatewayTimeout;
    /// `http_version_not_supported` (505).
    http_version_not_supported => HttpVersionNotSupported;
    /// `variant_also_negotiates` (506).
    variant_also_negotiates => VariantAlsoNegotiates;
    /// `insufficient_storage` (507).
    insufficient_storage => InsufficientStorage;
    /// `loop_detected` (508).
    loop_detected => LoopDetected;
    /// `not_extended` (510).
    not_extended => NotExtended;
    /// `network_auth_required` (511).
    network_authentication_required => NetworkAuthenticationRequired;
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for HttpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let cause = self.cause.as_ref().map(|c| c.to_string());
        match StatusClass::of(status) {
            Some(StatusClass::ServerError) if status == 503 => tracing::warn!(
                code = %self.code, request_id = %self.request_id, retry_after = self.retry_after,
                "service unavailable"
            ),
            Some(StatusClass::ServerError) | None => tracing::error!(
                code = %self.code, request_id = %self.request_id, cause = ?cause,
                "server error"
            ),
            Some(StatusClass::ClientError) if status == 429 => tracing::warn!(
                code = %self.code, request_id = %self.request_id, retry_after = self.retry_after,
                "rate limited"
            ),
            _ => tracing::debug!(code = %self.code, request_id = %self.request_id, "client error"),
        }

        let (status, headers, body) = self.response();
        (status, headers, Json(body)).into_response()
    }
}

/// An [`ErrorEnvelope`] served as `422 Unprocessable Entity` with the
/// `{"details": [...]}` body.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeResponse(pub ErrorEnvelope);

impl From<ErrorEnvelope> for EnvelopeResponse {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self(envelope)
    }
}

impl IntoResponse for EnvelopeResponse {
    fn into_response(self) -> Response {
        tracing::debug!(count = self.0.len(), "validation failed");
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self.0)).into_response()
    }
}
