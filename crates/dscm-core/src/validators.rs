//! Leaf validators shared by record validation.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::codes::ErrorCode;

/// A bare address (`local@domain.tld`); display-name forms are rejected.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)+$")
        .expect("valid email regex")
});

static MD5_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-fA-F0-9]{32}$").expect("valid md5 regex"));

/// Whether `email` is a bare, syntactically valid address.
pub fn is_email_format(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whether `checksum` is a 32-digit hex MD5 digest.
pub fn is_md5_hex(checksum: &str) -> bool {
    MD5_RE.is_match(checksum)
}

/// Check that `raw` (trimmed) is an absolute URI with a scheme and a host.
///
/// Returns the machine code describing the failure: [`ErrorCode::Required`]
/// for blank input, [`ErrorCode::Invalid`] otherwise.
pub fn validate_uri(raw: &str) -> Result<Url, ErrorCode> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ErrorCode::Required);
    }
    let url = Url::parse(trimmed).map_err(|_| ErrorCode::Invalid)?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(ErrorCode::Invalid),
    }
}
