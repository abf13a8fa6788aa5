//! Error types for the readings store.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The database could not be opened or the engine refused to serve.
    #[error("database unavailable: {reason}")]
    Unavailable {
        /// Driver-level description of the failure.
        reason: String,
    },

    /// A query failed during execution.
    #[error("query failed: {0}")]
    Query(rusqlite::Error),

    /// A stored timestamp could not be parsed back.
    #[error("malformed timestamp in storage: {value}")]
    MalformedTimestamp {
        /// The offending column text.
        value: String,
    },

    /// Metadata could not be encoded or decoded.
    #[error("metadata serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Classify a driver error.
    ///
    /// Busy, locked, and open failures mean the store is unavailable and map
    /// to a retriable condition for callers; everything else is a plain query
    /// failure.
    #[must_use]
    pub fn from_sqlite(e: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match e.sqlite_error_code() {
            Some(
                ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::CannotOpen
                | ErrorCode::NotADatabase,
            ) => Self::Unavailable {
                reason: e.to_string(),
            },
            _ => Self::Query(e),
        }
    }

    /// Whether this error means the backing store is unreachable rather than
    /// a fault in the query itself.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
