//! # Validation Errors & Envelope
//!
//! [`ValidationError`] is the single field-level diagnostic shared by every
//! API service. [`ErrorEnvelope`] aggregates them so that validating code can
//! collect every violation in one pass and return once.
//!
//! ## Wire Shape
//!
//! ```json
//! { "details": [ { "field": "data.owner.id", "message": "...", "loc": "body", "code": "required" } ] }
//! ```
//!
//! An envelope built with [`ErrorEnvelope::new`] serializes `details` as
//! `[]` while empty. A zero-initialized envelope ([`ErrorEnvelope::default`])
//! has no collection at all and serializes `details` as `null`. Both shapes
//! are observable by clients and are kept distinct.
//!
//! ## Error Identity
//!
//! Generic error-handling code needs to answer "was this a validation
//! failure?" and "which fields failed?" without knowing every wrapper type in
//! between. Two helpers walk the `source()` chain explicitly:
//!
//! - [`is_validation_failure`]: sentinel matching; any envelope matches
//!   [`ERR_VALIDATION`].
//! - [`as_validation_failure`]: typed extraction of the envelope.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::human_message_locale;
use crate::codes::ErrorCode;
use crate::error::CoreError;

/// Field marker for failures that concern the document as a whole rather
/// than a single field.
pub const NONE_FIELD_ERROR: &str = "none_field_error";

/// Where in the request the offending field lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Request body.
    #[default]
    Body,
    /// Request header.
    Header,
    /// Path parameter.
    Path,
    /// Query parameter.
    Query,
}

impl Location {
    /// Returns every recognized location.
    pub fn all() -> &'static [Location] {
        &[Self::Body, Self::Header, Self::Path, Self::Query]
    }

    /// The wire identifier, e.g. `"query"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Header => "header",
            Self::Path => "path",
            Self::Query => "query",
        }
    }

    /// Whether `s` names one of the recognized locations.
    pub fn is_valid(s: &str) -> bool {
        s.parse::<Location>().is_ok()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "body" => Ok(Self::Body),
            "header" => Ok(Self::Header),
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            other => Err(CoreError::UnknownLocation(other.to_string())),
        }
    }
}

/// A single field-level validation diagnostic.
///
/// - `field`: dot-addressable path into the validated payload
///   (`data.owner.id`), or [`NONE_FIELD_ERROR`] for document-level failures.
/// - `message`: human-readable, usually resolved from the catalog.
/// - `loc`: where the field resides.
/// - `code`: machine code from the taxonomy, or empty when built ad hoc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub loc: Location,
    pub code: String,
}

impl ValidationError {
    /// Build a diagnostic from its parts.
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        loc: Location,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            loc,
            code: code.into(),
        }
    }

    /// Build a diagnostic whose message comes from the catalog, with the
    /// field name substituted into the template.
    ///
    /// ```
    /// use dscm_core::{ErrorCode, Location, ValidationError};
    ///
    /// let e = ValidationError::localized("nb", ErrorCode::Required, "name", Location::Body);
    /// assert_eq!(e.message, "name er påkrevd.");
    /// assert_eq!(e.code, "required");
    /// ```
    pub fn localized(locale: &str, code: ErrorCode, field: &str, loc: Location) -> Self {
        Self::new(
            field,
            human_message_locale(locale, code, &[&field]),
            loc,
            code.as_str(),
        )
    }

    /// A document-level diagnostic not tied to any single field.
    pub fn document(message: impl Into<String>, loc: Location, code: impl Into<String>) -> Self {
        Self::new(NONE_FIELD_ERROR, message, loc, code)
    }

    /// Whether this diagnostic concerns the document rather than a field.
    pub fn is_document_level(&self) -> bool {
        self.field == NONE_FIELD_ERROR
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.loc, self.message)
    }
}

impl Error for ValidationError {}

/// Ordered collection of [`ValidationError`]s that behaves as one error.
///
/// Exclusively owned by the call path that builds it; append order is
/// preserved so the first violation found is the first one reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// `None` only for a zero-initialized envelope.
    #[serde(default)]
    pub details: Option<Vec<ValidationError>>,
}

impl ErrorEnvelope {
    /// An envelope with an empty (not absent) detail list.
    pub fn new() -> Self {
        Self {
            details: Some(Vec::new()),
        }
    }

    /// Append one diagnostic.
    ///
    /// Appending to a zero-initialized envelope creates the list.
    pub fn append(&mut self, entry: ValidationError) {
        self.details.get_or_insert_with(Vec::new).push(entry);
    }

    /// The diagnostics collected so far; empty when the list is absent.
    pub fn details(&self) -> &[ValidationError] {
        self.details.as_deref().unwrap_or(&[])
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.details().len()
    }

    /// True when no diagnostic has been collected.
    pub fn is_empty(&self) -> bool {
        self.details().is_empty()
    }

    /// Iterate diagnostics in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.details().iter()
    }

    /// Consume the envelope and return its diagnostics.
    pub fn into_details(self) -> Vec<ValidationError> {
        self.details.unwrap_or_default()
    }

    /// `Ok(())` when empty, otherwise the envelope as a [`CoreError::Validation`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation error")
    }
}

impl Error for ErrorEnvelope {}

impl From<Vec<ValidationError>> for ErrorEnvelope {
    fn from(details: Vec<ValidationError>) -> Self {
        Self {
            details: Some(details),
        }
    }
}

impl FromIterator<ValidationError> for ErrorEnvelope {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Extend<ValidationError> for ErrorEnvelope {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.details.get_or_insert_with(Vec::new).extend(iter);
    }
}

impl<'a> IntoIterator for &'a ErrorEnvelope {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Shared marker meaning "this is a validation failure".
///
/// Every [`ErrorEnvelope`] compares equal to it, whatever its contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValidationFailed;

/// The validation-failure sentinel.
pub const ERR_VALIDATION: ValidationFailed = ValidationFailed;

impl fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation error")
    }
}

impl Error for ValidationFailed {}

impl PartialEq<ValidationFailed> for ErrorEnvelope {
    fn eq(&self, _: &ValidationFailed) -> bool {
        true
    }
}

impl PartialEq<ErrorEnvelope> for ValidationFailed {
    fn eq(&self, _: &ErrorEnvelope) -> bool {
        true
    }
}

/// Whether `err`, or anything in its `source()` chain, is a validation
/// failure (an [`ErrorEnvelope`] or the [`ERR_VALIDATION`] sentinel itself).
pub fn is_validation_failure(err: &(dyn Error + 'static)) -> bool {
    chain(err).any(|e| e.is::<ErrorEnvelope>() || e.is::<ValidationFailed>())
}

/// The first [`ErrorEnvelope`] found walking `err`'s `source()` chain.
pub fn as_validation_failure<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a ErrorEnvelope> {
    chain(err).find_map(|e| e.downcast_ref::<ErrorEnvelope>())
}

fn chain<'a>(err: &'a (dyn Error + 'static)) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(err), |&e| e.source())
}
