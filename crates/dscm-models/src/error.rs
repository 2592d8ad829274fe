//! Errors raised by the shared record types.

use thiserror::Error;

/// Error parsing or building a shared record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A string did not name any variant of a closed vocabulary.
    #[error("unknown {kind}: {value:?}")]
    UnknownVariant {
        /// Vocabulary that was being parsed (`record status`, `trigger type`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl ModelError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
