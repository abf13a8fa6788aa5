//! Error types for the Thermolog hub

use thiserror::Error;

/// Result type for hub operations
pub type Result<T> = std::result::Result<T, HubError>;

/// Errors that can occur while running the hub
#[derive(Error, Debug)]
pub enum HubError {
    /// Configuration file problems
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading store failure
    #[error("store error: {0}")]
    Store(#[from] therm_store::Error),

    /// HTTP server failure
    #[error("server error: {0}")]
    Server(#[from] therm_dashboard::ApiError),

    /// IO failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = HubError::Config("server.bind_addr must be a host:port address".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: server.bind_addr must be a host:port address"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: HubError = io.into();
        assert!(matches!(err, HubError::Io(_)));
        assert!(err.to_string().starts_with("io error:"));
    }

    #[test]
    fn test_store_error_conversion() {
        let store = therm_store::Error::Unavailable {
            reason: "disk I/O error".to_string(),
        };
        let err: HubError = store.into();
        assert!(matches!(err, HubError::Store(_)));
    }
}
