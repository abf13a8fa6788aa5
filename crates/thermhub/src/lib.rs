//! Thermolog hub library
//!
//! Wires the SQLite reading store and the dashboard HTTP server into
//! one long-running service. The binary adds configuration loading and
//! signal handling on top.

pub mod config;
pub mod error;

pub use config::{DatabaseConfig, HubConfig, ServerConfig};
pub use error::{HubError, Result};
