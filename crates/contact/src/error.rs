//! Error types for contact handoff.

use thiserror::Error;

/// Result type alias for contact operations.
pub type Result<T> = std::result::Result<T, ContactError>;

/// Errors building a contact action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    /// WhatsApp needs a number with at least one digit
    #[error("Invalid WhatsApp number: {0:?}")]
    InvalidNumber(String),
}

impl From<ContactError> for karia_core::Error {
    fn from(err: ContactError) -> Self {
        karia_core::Error::validation(err.to_string())
            .with_suggestion("Use the international format, e.g. 919876543210")
    }
}
