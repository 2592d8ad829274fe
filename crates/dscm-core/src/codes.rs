//! # Machine Codes — Error Taxonomy
//!
//! Stable, non-localized identifiers for every error and response category
//! the platform speaks. The string form (`not_found`, `required`, ...) is the
//! wire contract; the enum exists so that callers matching on well-known
//! categories get exhaustiveness checking.
//!
//! Codes are deliberately open at the edges: the catalog and the status table
//! both accept arbitrary strings and fall back to the internal-error entry for
//! anything outside this enum. New codes extend the enum; services must not
//! invent ad hoc strings for the boundary categories listed here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Every machine code known to the shared taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// `internal_error` (500).
    #[serde(rename = "internal_error")]
    Internal,
    /// `unauthorized` (401).
    Unauthorized,
    /// `forbidden` (403).
    Forbidden,
    /// `not_found` (404).
    NotFound,
    /// `conflict` (409).
    Conflict,
    /// `bad_request` (400).
    BadRequest,
    /// `validation_failed` (422).
    ValidationFailed,
    /// `too_many_requests` (429).
    TooManyRequests,
    /// `required` (400).
    Required,
    /// `invalid_email_format` (400).
    InvalidEmailFormat,
    /// `invalid_json_format` (400).
    InvalidJsonFormat,
    /// `invalid_status` (400).
    InvalidStatus,
    /// `invalid` (400).
    Invalid,
    /// `invalid_data_type` (500).
    InvalidDataType,
    /// `bad_gateway` (502).
    BadGateway,
    /// `ok` (200).
    Ok,
    /// `created` (201).
    Created,
    /// `accepted` (202).
    Accepted,
    /// `non_authoritative_info` (203).
    NonAuthoritativeInfo,
    /// `no_content` (204).
    NoContent,
    /// `reset_content` (205).
    ResetContent,
    /// `partial_content` (206).
    PartialContent,
    /// `multi_status` (207).
    MultiStatus,
    /// `already_reported` (208).
    AlreadyReported,
    /// `im_used` (226).
    ImUsed,
    /// `multiple_choices` (300).
    MultipleChoices,
    /// `moved_permanently` (301).
    MovedPermanently,
    /// `found` (302).
    Found,
    /// `see_other` (303).
    SeeOther,
    /// `not_modified` (304).
    NotModified,
    /// `use_proxy` (305).
    UseProxy,
    /// `unused` (306).
    Unused,
    /// `temporary_redirect` (307).
    TemporaryRedirect,
    /// `permanent_redirect` (308).
    PermanentRedirect,
    /// `payment_required` (402).
    PaymentRequired,
    /// `method_not_allowed` (405).
    MethodNotAllowed,
    /// `not_acceptable` (406).
    NotAcceptable,
    /// `proxy_auth_required` (407).
    ProxyAuthRequired,
    /// `request_timeout` (408).
    RequestTimeout,
    /// `gone` (410).
    Gone,
    /// `length_required` (411).
    LengthRequired,
    /// `precondition_failed` (412).
    PreconditionFailed,
    /// `content_too_large` (413).
    ContentTooLarge,
    /// `uri_too_long` (414).
    UriTooLong,
    /// `unsupported_media_type` (415).
    UnsupportedMediaType,
    /// `range_not_satisfiable` (416).
    RangeNotSatisfiable,
    /// `expectation_failed` (417).
    ExpectationFailed,
    /// `im_a_teapot` (418).
    ImATeapot,
    /// `misdirected_request` (421).
    MisdirectedRequest,
    /// `unprocessable_content` (422).
    UnprocessableContent,
    /// `locked` (423).
    Locked,
    /// `failed_dependency` (424).
    FailedDependency,
    /// `too_early` (425).
    TooEarly,
    /// `upgrade_required` (426).
    UpgradeRequired,
    /// `precondition_required` (428).
    PreconditionRequired,
    /// `request_header_fields_too_large` (431).
    RequestHeaderFieldsTooLarge,
    /// `unavailable_for_legal_reasons` (451).
    UnavailableForLegalReasons,
    /// `not_implemented` (501).
    NotImplemented,
    /// `service_unavailable` (503).
    ServiceUnavailable,
    /// `gateway_timeout` (504).
    GatewayTimeout,
    /// `http_version_not_supported` (505).
    HttpVersionNotSupported,
    /// `variant_also_negotiates` (506).
    VariantAlsoNegotiates,
    /// `insufficient_storage` (507).
    InsufficientStorage,
    /// `loop_detected` (508).
    LoopDetected,
    /// `not_extended` (510).
    NotExtended,
    /// `network_auth_required` (511).
    #[serde(rename = "network_auth_required")]
    NetworkAuthenticationRequired,
    /// `require_positive_int` (400).
    RequirePositiveInt,
}

/// Number of machine codes in the taxonomy.
pub const ERROR_CODE_COUNT: usize = 67;

impl ErrorCode {
    /// Returns every machine code in declaration order.
    pub fn all() -> &'static [ErrorCode] {
        &[
            Self::Internal,
            Self::Unauthorized,
            Self::Forbidden,
            Self::NotFound,
            Self::Conflict,
            Self::BadRequest,
            Self::ValidationFailed,
            Self::TooManyRequests,
            Self::Required,
            Self::InvalidEmailFormat,
            Self::InvalidJsonFormat,
            Self::InvalidStatus,
            Self::Invalid,
            Self::InvalidDataType,
            Self::BadGateway,
            Self::Ok,
            Self::Created,
            Self::Accepted,
            Self::NonAuthoritativeInfo,
            Self::NoContent,
            Self::ResetContent,
            Self::PartialContent,
            Self::MultiStatus,
            Self::AlreadyReported,
            Self::ImUsed,
            Self::MultipleChoices,
            Self::MovedPermanently,
            Self::Found,
            Self::SeeOther,
            Self::NotModified,
            Self::UseProxy,
            Self::Unused,
            Self::TemporaryRedirect,
            Self::PermanentRedirect,
            Self::PaymentRequired,
            Self::MethodNotAllowed,
            Self::NotAcceptable,
            Self::ProxyAuthRequired,
            Self::RequestTimeout,
            Self::Gone,
            Self::LengthRequired,
            Self::PreconditionFailed,
            Self::ContentTooLarge,
            Self::UriTooLong,
            Self::UnsupportedMediaType,
            Self::RangeNotSatisfiable,
            Self::ExpectationFailed,
            Self::ImATeapot,
            Self::MisdirectedRequest,
            Self::UnprocessableContent,
            Self::Locked,
            Self::FailedDependency,
            Self::TooEarly,
            Self::UpgradeRequired,
            Self::PreconditionRequired,
            Self::RequestHeaderFieldsTooLarge,
            Self::UnavailableForLegalReasons,
            Self::NotImplemented,
            Self::ServiceUnavailable,
            Self::GatewayTimeout,
            Self::HttpVersionNotSupported,
            Self::VariantAlsoNegotiates,
            Self::InsufficientStorage,
            Self::LoopDetected,
            Self::NotExtended,
            Self::NetworkAuthenticationRequired,
            Self::RequirePositiveInt,
        ]
    }

    /// Returns the wire identifier for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal_error",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::BadRequest => "bad_request",
            Self::ValidationFailed => "validation_failed",
            Self::TooManyRequests => "too_many_requests",
            Self::Required => "required",
            Self::InvalidEmailFormat => "invalid_email_format",
            Self::InvalidJsonFormat => "invalid_json_format",
            Self::InvalidStatus => "invalid_status",
            Self::Invalid => "invalid",
            Self::InvalidDataType => "invalid_data_type",
            Self::BadGateway => "bad_gateway",
            Self::Ok => "ok",
            Self::Created => "created",
            Self::Accepted => "accepted",
            Self::NonAuthoritativeInfo => "non_authoritative_info",
            Self::NoContent => "no_content",
            Self::ResetContent => "reset_content",
            Self::PartialContent => "partial_content",
            Self::MultiStatus => "multi_status",
            Self::AlreadyReported => "already_reported",
            Self::ImUsed => "im_used",
            Self::MultipleChoices => "multiple_choices",
            Self::MovedPermanently => "moved_permanently",
            Self::Found => "found",
            Self::SeeOther => "see_other",
            Self::NotModified => "not_modified",
            Self::UseProxy => "use_proxy",
            Self::Unused => "unused",
            Self::TemporaryRedirect => "temporary_redirect",
            Self::PermanentRedirect => "permanent_redirect",
            Self::PaymentRequired => "payment_required",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::NotAcceptable => "not_acceptable",
            Self::ProxyAuthRequired => "proxy_auth_required",
            Self::RequestTimeout => "request_timeout",
            Self::Gone => "gone",
            Self::LengthRequired => "length_required",
            Self::PreconditionFailed => "precondition_failed",
            Self::ContentTooLarge => "content_too_large",
            Self::UriTooLong => "uri_too_long",
            Self::UnsupportedMediaType => "unsupported_media_type",
            Self::RangeNotSatisfiable => "range_not_satisfiable",
            Self::ExpectationFailed => "expectation_failed",
            Self::ImATeapot => "im_a_teapot",
            Self::MisdirectedRequest => "misdirected_request",
            Self::UnprocessableContent => "unprocessable_content",
            Self::Locked => "locked",
            Self::FailedDependency => "failed_dependency",
            Self::TooEarly => "too_early",
            Self::UpgradeRequired => "upgrade_required",
            Self::PreconditionRequired => "precondition_required",
            Self::RequestHeaderFieldsTooLarge => "request_header_fields_too_large",
            Self::UnavailableForLegalReasons => "unavailable_for_legal_reasons",
            Self::NotImplemented => "not_implemented",
            Self::ServiceUnavailable => "service_unavailable",
            Self::GatewayTimeout => "gateway_timeout",
            Self::HttpVersionNotSupported => "http_version_not_supported",
            Self::VariantAlsoNegotiates => "variant_also_negotiates",
            Self::InsufficientStorage => "insufficient_storage",
            Self::LoopDetected => "loop_detected",
            Self::NotExtended => "not_extended",
            Self::NetworkAuthenticationRequired => "network_auth_required",
            Self::RequirePositiveInt => "require_positive_int",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ErrorCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for ErrorCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal_error" => Ok(Self::Internal),
            "unauthorized" => Ok(Self::Unauthorized),
            "forbidden" => Ok(Self::Forbidden),
            "not_found" => Ok(Self::NotFound),
            "conflict" => Ok(Self::Conflict),
            "bad_request" => Ok(Self::BadRequest),
            "validation_failed" => Ok(Self::ValidationFailed),
            "too_many_requests" => Ok(Self::TooManyRequests),
            "required" => Ok(Self::Required),
            "invalid_email_format" => Ok(Self::InvalidEmailFormat),
            "invalid_json_format" => Ok(Self::InvalidJsonFormat),
            "invalid_status" => Ok(Self::InvalidStatus),
            "invalid" => Ok(Self::Invalid),
            "invalid_data_type" => Ok(Self::InvalidDataType),
            "bad_gateway" => Ok(Self::BadGateway),
            "ok" => Ok(Self::Ok),
            "created" => Ok(Self::Created),
            "accepted" => Ok(Self::Accepted),
            "non_authoritative_info" => Ok(Self::NonAuthoritativeInfo),
            "no_content" => Ok(Self::NoContent),
            "reset_content" => Ok(Self::ResetContent),
            "partial_content" => Ok(Self::PartialContent),
            "multi_status" => Ok(Self::MultiStatus),
            "already_reported" => Ok(Self::AlreadyReported),
            "im_used" => Ok(Self::ImUsed),
            "multiple_choices" => Ok(Self::MultipleChoices),
            "moved_permanently" => Ok(Self::MovedPermanently),
            "found" => Ok(Self::Found),
            "see_other" => Ok(Self::SeeOther),
            "not_modified" => Ok(Self::NotModified),
            "use_proxy" => Ok(Self::UseProxy),
            "unused" => Ok(Self::Unused),
            "temporary_redirect" => Ok(Self::TemporaryRedirect),
            "permanent_redirect" => Ok(Self::PermanentRedirect),
            "payment_required" => Ok(Self::PaymentRequired),
            "method_not_allowed" => Ok(Self::MethodNotAllowed),
            "not_acceptable" => Ok(Self::NotAcceptable),
            "proxy_auth_required" => Ok(Self::ProxyAuthRequired),
            "request_timeout" => Ok(Self::RequestTimeout),
            "gone" => Ok(Self::Gone),
            "length_required" => Ok(Self::LengthRequired),
            "precondition_failed" => Ok(Self::PreconditionFailed),
            "content_too_large" => Ok(Self::ContentTooLarge),
            "uri_too_long" => Ok(Self::UriTooLong),
            "unsupported_media_type" => Ok(Self::UnsupportedMediaType),
            "range_not_satisfiable" => Ok(Self::RangeNotSatisfiable),
            "expectation_failed" => Ok(Self::ExpectationFailed),
            "im_a_teapot" => Ok(Self::ImATeapot),
            "misdirected_request" => Ok(Self::MisdirectedRequest),
            "unprocessable_content" => Ok(Self::UnprocessableContent),
            "locked" => Ok(Self::Locked),
            "failed_dependency" => Ok(Self::FailedDependency),
            "too_early" => Ok(Self::TooEarly),
            "upgrade_required" => Ok(Self::UpgradeRequired),
            "precondition_required" => Ok(Self::PreconditionRequired),
            "request_header_fields_too_large" => Ok(Self::RequestHeaderFieldsTooLarge),
            "unavailable_for_legal_reasons" => Ok(Self::UnavailableForLegalReasons),
            "not_implemented" => Ok(Self::NotImplemented),
            "service_unavailable" => Ok(Self::ServiceUnavailable),
            "gateway_timeout" => Ok(Self::GatewayTimeout),
            "http_version_not_supported" => Ok(Self::HttpVersionNotSupported),
            "variant_also_negotiates" => Ok(Self::VariantAlsoNegotiates),
            "insufficient_storage" => Ok(Self::InsufficientStorage),
            "loop_detected" => Ok(Self::LoopDetected),
            "not_extended" => Ok(Self::NotExtended),
            "network_auth_required" => Ok(Self::NetworkAuthenticationRequired),
            "require_positive_int" => Ok(Self::RequirePositiveInt),
            other => Err(CoreError::UnknownCode(other.to_string())),
        }
    }
}
