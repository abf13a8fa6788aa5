//! Error types for the therm-proto crate.

use thiserror::Error;

/// Errors that can occur while validating or parsing API payloads.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// A submitted field failed validation.
    #[error("{0}")]
    Validation(String),
}

impl ProtoError {
    /// The message carried by this error, as sent on the wire.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) => msg,
        }
    }
}
