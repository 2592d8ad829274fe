//! # Status Table
//!
//! Maps machine codes to their default transport status and retry posture.
//! The mapping is total: any string, including codes outside the taxonomy,
//! resolves to a status. Unknown codes land on 500 Internal Server Error.
//!
//! There is no separate category field. Whether a code is informational,
//! success, redirect, client error or server error is read off its numeric
//! status via [`StatusClass::of`].

use crate::codes::ErrorCode;

/// Status returned for codes absent from the table.
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Default retry-after hint (seconds) for `too_many_requests`.
pub const TOO_MANY_REQUESTS_RETRY_SECS: i64 = 60;

/// Default retry-after hint (seconds) for `service_unavailable`.
pub const SERVICE_UNAVAILABLE_RETRY_SECS: i64 = 30;

impl ErrorCode {
    /// Default transport status for this code.
    pub fn default_status(self) -> u16 {
        match self {
            ErrorCode::Internal => 500,
            ErrorCode::Unauthorized => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 409,
            ErrorCode::BadRequest => 400,
            ErrorCode::ValidationFailed => 422,
            ErrorCode::TooManyRequests => 429,
            ErrorCode::Required => 400,
            ErrorCode::InvalidEmailFormat => 400,
            ErrorCode::InvalidJsonFormat => 400,
            ErrorCode::InvalidStatus => 400,
            ErrorCode::Invalid => 400,
            ErrorCode::InvalidDataType => 500,
            ErrorCode::BadGateway => 502,
            ErrorCode::Ok => 200,
            ErrorCode::Created => 201,
            ErrorCode::Accepted => 202,
            ErrorCode::NonAuthoritativeInfo => 203,
            ErrorCode::NoContent => 204,
            ErrorCode::ResetContent => 205,
            ErrorCode::PartialContent => 206,
            ErrorCode::MultiStatus => 207,
            ErrorCode::AlreadyReported => 208,
            ErrorCode::ImUsed => 226,
            ErrorCode::MultipleChoices => 300,
            ErrorCode::MovedPermanently => 301,
            ErrorCode::Found => 302,
            ErrorCode::SeeOther => 303,
            ErrorCode::NotModified => 304,
            ErrorCode::UseProxy => 305,
            ErrorCode::Unused => 306,
            ErrorCode::TemporaryRedirect => 307,
            ErrorCode::PermanentRedirect => 308,
            ErrorCode::PaymentRequired => 402,
            ErrorCode::MethodNotAllowed => 405,
            ErrorCode::NotAcceptable => 406,
            ErrorCode::ProxyAuthRequired => 407,
            ErrorCode::RequestTimeout => 408,
            ErrorCode::Gone => 410,
            ErrorCode::LengthRequired => 411,
            ErrorCode::PreconditionFailed => 412,
            ErrorCode::ContentTooLarge => 413,
            ErrorCode::UriTooLong => 414,
            ErrorCode::UnsupportedMediaType => 415,
            ErrorCode::RangeNotSatisfiable => 416,
            ErrorCode::ExpectationFailed => 417,
            ErrorCode::ImATeapot => 418,
            ErrorCode::MisdirectedRequest => 421,
            ErrorCode::UnprocessableContent => 422,
            ErrorCode::Locked => 423,
            ErrorCode::FailedDependency => 424,
            ErrorCode::TooEarly => 425,
            ErrorCode::UpgradeRequired => 426,
            ErrorCode::PreconditionRequired => 428,
            ErrorCode::RequestHeaderFieldsTooLarge => 431,
            ErrorCode::UnavailableForLegalReasons => 451,
            ErrorCode::NotImplemented => 501,
            ErrorCode::ServiceUnavailable => 503,
            ErrorCode::GatewayTimeout => 504,
            ErrorCode::HttpVersionNotSupported => 505,
            ErrorCode::VariantAlsoNegotiates => 506,
            ErrorCode::InsufficientStorage => 507,
            ErrorCode::LoopDetected => 508,
            ErrorCode::NotExtended => 510,
            ErrorCode::NetworkAuthenticationRequired => 511,
            ErrorCode::RequirePositiveInt => 400,
        }
    }

    /// Default retry-after hint in seconds; zero means "not retryable".
    pub fn default_retry_after(self) -> i64 {
        match self {
            ErrorCode::TooManyRequests => TOO_MANY_REQUESTS_RETRY_SECS,
            ErrorCode::ServiceUnavailable => SERVICE_UNAVAILABLE_RETRY_SECS,
            _ => 0,
        }
    }
}

/// Resolve the default transport status for an arbitrary code string.
///
/// Never fails: codes outside the taxonomy map to [`INTERNAL_SERVER_ERROR`].
///
/// ```
/// use dscm_core::status::status_for;
///
/// assert_eq!(status_for("too_many_requests"), 429);
/// assert_eq!(status_for("no_such_code"), 500);
/// ```
pub fn status_for(code: &str) -> u16 {
    code.parse::<ErrorCode>()
        .map(ErrorCode::default_status)
        .unwrap_or(INTERNAL_SERVER_ERROR)
}

/// Resolve the default retry-after hint for an arbitrary code string.
pub fn retry_after_for(code: &str) -> i64 {
    code.parse::<ErrorCode>()
        .map(ErrorCode::default_retry_after)
        .unwrap_or(0)
}

/// Conventional category of a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirection,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
}

impl StatusClass {
    /// Classify a numeric status. Returns `None` outside 100..=599.
    pub fn of(status: u16) -> Option<Self> {
        match status {
            100..=199 => Some(Self::Informational),
            200..=299 => Some(Self::Success),
            300..=399 => Some(Self::Redirection),
            400..=499 => Some(Self::ClientError),
            500..=599 => Some(Self::ServerError),
            _ => None,
        }
    }

    /// True for 4xx and 5xx.
    pub fn is_error(self) -> bool {
        matches!(self, Self::ClientError | Self::ServerError)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Success => "success",
            Self::Redirection => "redirection",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
        }
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_statuses() {
        assert_eq!(status_for("not_found"), 404);
        assert_eq!(status_for("bad_request"), 400);
        assert_eq!(status_for("validation_failed"), 422);
        assert_eq!(status_for("too_many_requests"), 429);
        assert_eq!(status_for("service_unavailable"), 503);
        assert_eq!(status_for("unused"), 306);
        assert_eq!(status_for("network_auth_required"), 511);
        assert_eq!(status_for("required"), 400);
    }

    #[test]
    fn data_type_errors_are_server_class() {
        assert_eq!(status_for("invalid_data_type"), 500);
        assert_eq!(
            StatusClass::of(ErrorCode::InvalidDataType.default_status()),
            Some(StatusClass::ServerError)
        );
    }

    #[test]
    fn unknown_code_is_internal() {
        assert_eq!(status_for(""), INTERNAL_SERVER_ERROR);
        assert_eq!(status_for("NOT_FOUND"), INTERNAL_SERVER_ERROR);
        assert_eq!(status_for("teapot"), INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn every_code_is_in_status_range() {
        for code in ErrorCode::all() {
            let status = code.default_status();
            assert!(
                StatusClass::of(status).is_some(),
                "{code} maps to out-of-range status {status}"
            );
        }
    }

    #[test]
    fn retry_defaults() {
        assert_eq!(retry_after_for("too_many_requests"), 60);
        assert_eq!(retry_after_for("service_unavailable"), 30);
        assert_eq!(retry_after_for("not_found"), 0);
        assert_eq!(retry_after_for("bogus"), 0);
    }

    #[test]
    fn classes() {
        assert_eq!(StatusClass::of(ErrorCode::Ok.default_status()), Some(StatusClass::Success));
        assert_eq!(
            StatusClass::of(ErrorCode::MovedPermanently.default_status()),
            Some(StatusClass::Redirection)
        );
        assert_eq!(
            StatusClass::of(ErrorCode::Conflict.default_status()),
            Some(StatusClass::ClientError)
        );
        assert_eq!(
            StatusClass::of(ErrorCode::BadGateway.default_status()),
            Some(StatusClass::ServerError)
        );
        assert_eq!(StatusClass::of(99), None);
        assert_eq!(StatusClass::of(600), None);
        assert!(StatusClass::ServerError.is_error());
        assert!(!StatusClass::Redirection.is_error());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The table is total: any string resolves to a valid status.
        #[test]
        fn status_for_is_total(code in ".{0,40}") {
            let status = status_for(&code);
            prop_assert!(StatusClass::of(status).is_some());
        }

        /// Strings outside the taxonomy resolve to 500.
        #[test]
        fn unknown_codes_are_internal(code in "[A-Z]{1,12}") {
            prop_assert_eq!(status_for(&code), INTERNAL_SERVER_ERROR);
        }
    }
}
