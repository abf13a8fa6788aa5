//! Error types for API calls.

use thiserror::Error;

/// Result type for API calls.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from talking to a Thermolog hub.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure: connect, timeout, or mid-body I/O.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("server rejected request ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Error message from the response body, or the status reason.
        message: String,
    },

    /// The response body did not match the wire contract.
    #[error("malformed response: {reason}")]
    Decode {
        /// Description of what failed to decode.
        reason: String,
    },
}
