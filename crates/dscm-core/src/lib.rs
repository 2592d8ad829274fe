//! # dscm-core — Shared Diagnostics Contract
//!
//! Every API service in the fleet reports failures the same way: a stable
//! machine code, a human message in the caller's language, an HTTP status,
//! and (for input problems) a list of field-level diagnostics. This crate
//! defines that contract. The HTTP boundary lives in `dscm-http`; schema
//! checks live in `dscm-schema`.
//!
//! ## Key Design Principles
//!
//! 1. **One taxonomy.** [`ErrorCode`] enumerates every machine code. Catalog
//!    tables and the status table are exhaustive `match`es over it, so adding
//!    a code forces both to handle it.
//!
//! 2. **Total lookups.** Message and status resolution never fail. Unknown
//!    locales fall back to English, unknown codes to `internal_error`, and
//!    unknown statuses to 500.
//!
//! 3. **Collect, then fail once.** Validation appends to an
//!    [`ErrorEnvelope`] and returns it as a single error; callers recognize
//!    it anywhere in a `source()` chain with [`is_validation_failure`] and
//!    [`as_validation_failure`].
//!
//! 4. **Transparent flexible attributes.** [`Jsonb<T>`] encodes exactly like
//!    `T`, decodes `null` to the zero value, and validates encodability.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dscm-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.
//! - Global state is limited to the read-only message catalog.

pub mod catalog;
pub mod codes;
pub mod error;
pub mod jsonb;
pub mod status;
pub mod validation;
pub mod validators;

// Re-export primary types for ergonomic imports.
pub use catalog::{
    custom_human_message_locale, get_locale, human_message, human_message_locale, CustomLocale,
    CustomMessage, Locale, MessageCatalog, DEFAULT_LOCALE,
};
pub use codes::{ErrorCode, ERROR_CODE_COUNT};
pub use error::{CoreError, JsonbError};
pub use jsonb::{Emptiness, Jsonb};
pub use status::{retry_after_for, status_for, StatusClass, INTERNAL_SERVER_ERROR};
pub use validation::{
    as_validation_failure, is_validation_failure, ErrorEnvelope, Location, ValidationError,
    ValidationFailed, ERR_VALIDATION, NONE_FIELD_ERROR,
};
pub use validators::{is_email_format, is_md5_hex, validate_uri};
