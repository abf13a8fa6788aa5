//! Probe configuration.
//!
//! Configuration for the probe agent, including:
//! - Server endpoint and device identity
//! - Push interval
//! - Sensor backend selection

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

fn default_device_id() -> String {
    "pico_w_001".to_string()
}

const fn default_interval_secs() -> u64 {
    2
}

fn default_backend() -> String {
    "synthetic".to_string()
}

/// Configuration for the temperature sensor backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SensorConfig {
    /// Sensor backend, either `"synthetic"` or `"w1"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Explicit 1-Wire device id (for example `28-0316a2794bff`).
    /// When absent the first DS18B20 on the bus is used.
    pub w1_device: Option<String>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            w1_device: None,
        }
    }
}

/// Main probe configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeConfig {
    /// Base URL of the Thermolog server.
    pub endpoint: String,
    /// Device identifier attached to every reading.
    #[serde(default = "default_device_id")]
    pub device_id: String,
    /// Seconds between readings.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Sensor configuration.
    #[serde(default)]
    pub sensor: SensorConfig,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000".to_string(),
            device_id: default_device_id(),
            interval_secs: default_interval_secs(),
            sensor: SensorConfig::default(),
        }
    }
}

impl ProbeConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ProbeError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ProbeError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ProbeError::Config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Write this configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProbeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProbeError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.endpoint.is_empty() {
            return Err(ProbeError::Config("endpoint cannot be empty".to_string()));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ProbeError::Config(
                "endpoint must start with http:// or https://".to_string(),
            ));
        }

        if self.device_id.is_empty() {
            return Err(ProbeError::Config("device_id cannot be empty".to_string()));
        }

        if self.device_id.len() > 64 {
            return Err(ProbeError::Config(
                "device_id cannot exceed 64 characters".to_string(),
            ));
        }

        if !self
            .device_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ProbeError::Config(
                "device_id must contain only alphanumeric characters, hyphens, and underscores"
                    .to_string(),
            ));
        }

        if self.interval_secs == 0 {
            return Err(ProbeError::Config(
                "interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.sensor.backend != "synthetic" && self.sensor.backend != "w1" {
            return Err(ProbeError::Config(format!(
                "unknown sensor backend '{}', expected 'synthetic' or 'w1'",
                self.sensor.backend
            )));
        }

        Ok(())
    }
}
