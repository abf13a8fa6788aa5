//! Error types for chart operations.

use thiserror::Error;

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors from refresh scheduling.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// Requested interval is not one of the supported refresh intervals.
    #[error("unsupported refresh interval: {seconds}s")]
    UnsupportedInterval {
        /// The rejected interval, in seconds.
        seconds: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unsupported_interval() {
        let err = SchedulerError::UnsupportedInterval { seconds: 7 };
        assert_eq!(err.to_string(), "unsupported refresh interval: 7s");
    }
}
