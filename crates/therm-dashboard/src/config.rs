//! Dashboard server configuration.

use std::net::SocketAddr;

/// Configuration for the dashboard server.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// CORS allowed origins (empty means all).
    pub cors_origins: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000"
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 3000))),
            cors_origins: Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Add a CORS allowed origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();

        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 9000);
        let config = DashboardConfig::new(addr)
            .with_cors_origin("http://localhost:5173")
            .with_cors_origin("https://thermolog.example.com");

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(
            config
                .cors_origins
                .contains(&"http://localhost:5173".to_string())
        );
    }
}
