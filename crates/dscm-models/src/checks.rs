//! # Record Validation
//!
//! Every shared record implements [`Validate`], producing an ordered list of
//! field-level [`ValidationError`]s in the caller's locale. Records never
//! stop at the first failure: clients receive every violation at once.
//!
//! [`Checks`] is the collector the record impls share. Catalog codes supply
//! the standard wording (`required`, `invalid_email_format`, ...); checks
//! the catalog has no template for use a bilingual [`CustomMessage`].

use dscm_core::{
    custom_human_message_locale, human_message_locale, CoreError, CustomMessage, ErrorCode,
    ErrorEnvelope, Location, ValidationError,
};

/// A record that can check its own invariants.
pub trait Validate {
    /// Collect every violation, addressed at `loc`, with messages in `locale`.
    fn validate(&self, loc: Location, locale: &str) -> Vec<ValidationError>;

    /// Validate and wrap any violations in an [`ErrorEnvelope`] error.
    fn ensure_valid(&self, loc: Location, locale: &str) -> Result<(), CoreError> {
        ErrorEnvelope::from(self.validate(loc, locale)).into_result()
    }
}

/// Ordered collector of field diagnostics for one record.
#[derive(Debug)]
pub struct Checks<'a> {
    loc: Location,
    locale: &'a str,
    errors: Vec<ValidationError>,
}

impl<'a> Checks<'a> {
    pub fn new(loc: Location, locale: &'a str) -> Self {
        Self {
            loc,
            locale,
            errors: Vec::new(),
        }
    }

    pub fn locale(&self) -> &'a str {
        self.locale
    }

    /// Record a violation whose message is the catalog template for `code`,
    /// with the field name as its argument.
    pub fn fail(&mut self, field: &str, code: ErrorCode) {
        self.errors
            .push(ValidationError::localized(self.locale, code, field, self.loc));
    }

    /// Record a violation with a caller-supplied bilingual message.
    pub fn fail_with(&mut self, field: &str, code: ErrorCode, message: &CustomMessage) {
        self.errors.push(ValidationError::new(
            field,
            custom_human_message_locale(self.locale, message),
            self.loc,
            code.as_str(),
        ));
    }

    /// Record a violation with a catalog template filled from `args`.
    pub fn fail_args(&mut self, field: &str, code: ErrorCode, args: &[&dyn std::fmt::Display]) {
        self.errors.push(ValidationError::new(
            field,
            human_message_locale(self.locale, code, args),
            self.loc,
            code.as_str(),
        ));
    }

    /// `required` violation when `missing` holds. Returns whether the value
    /// was present so dependent checks can be skipped.
    pub fn require(&mut self, field: &str, missing: bool) -> bool {
        if missing {
            self.fail(field, ErrorCode::Required);
        }
        !missing
    }

    pub fn finish(self) -> Vec<ValidationError> {
        self.errors
    }
}

pub(crate) fn invalid_json_structure() -> CustomMessage {
    CustomMessage::new("invalid JSON structure", "ugyldig JSON-struktur")
}

pub(crate) fn invalid_uri() -> CustomMessage {
    CustomMessage::new("invalid URI", "ugyldig URI")
}
