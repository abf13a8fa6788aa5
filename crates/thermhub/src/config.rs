//! Hub configuration.
//!
//! Configuration for the hub server, including:
//! - HTTP bind address and CORS policy
//! - SQLite database location

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use therm_dashboard::DashboardConfig;

use crate::error::HubError;

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_database_path() -> String {
    "thermolog.db".to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// CORS allowed origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_origins: Vec::new(),
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file. Created on first run.
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Main hub configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HubConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl HubConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HubError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            HubError::Config(format!(
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
    pub fn from_toml(content: &str) -> Result<Self, HubError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| HubError::Config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Write this configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HubError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HubError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(HubError::Config(format!(
                "server.bind_addr '{}' must be a host:port address",
                self.server.bind_addr
            )));
        }

        for origin in &self.server.cors_origins {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(HubError::Config(format!(
                    "cors origin '{origin}' must start with http:// or https://"
                )));
            }
        }

        if self.database.path.is_empty() {
            return Err(HubError::Config(
                "database.path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, HubError> {
        self.server.bind_addr.parse().map_err(|_| {
            HubError::Config(format!(
                "server.bind_addr '{}' must be a host:port address",
                self.server.bind_addr
            ))
        })
    }

    /// Dashboard server settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address does not parse.
    pub fn dashboard_config(&self) -> Result<DashboardConfig, HubError> {
        let mut config = DashboardConfig::new(self.bind_addr()?);
        for origin in &self.server.cors_origins {
            config = config.with_cors_origin(origin.clone());
        }
        Ok(config)
    }
}
