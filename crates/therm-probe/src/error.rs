//! Error types for the probe agent.

use thiserror::Error;

/// Errors that can occur in probe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Sensor read or parse failure.
    #[error("sensor read failed: {0}")]
    Sensor(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The server rejected or never received a reading.
    #[error("push failed: {0}")]
    Push(#[from] therm_client::ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ProbeError::Config("endpoint cannot be empty".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: endpoint cannot be empty"
        );
    }

    #[test]
    fn test_sensor_error_display() {
        let err = ProbeError::Sensor("CRC check failed".to_string());
        assert_eq!(err.to_string(), "sensor read failed: CRC check failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ProbeError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn test_push_error_conversion() {
        let client_err = therm_client::ClientError::Decode {
            reason: "truncated body".to_string(),
        };
        let err: ProbeError = client_err.into();
        assert!(err.to_string().starts_with("push failed"));
    }
}
