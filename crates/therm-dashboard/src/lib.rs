//! # therm-dashboard
//!
//! HTTP API and embedded web dashboard for Thermolog temperature logging.
//!
//! This crate serves the ingestion and query endpoints backed by a
//! [`therm_store::ReadingStore`], plus a self-contained HTML dashboard,
//! built on the axum HTTP framework.
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api` | POST | Insert one temperature reading |
//! | `/api` | GET | List readings, newest first, paginated |
//! | `/api/devices` | GET | Per-device summaries |
//! | `/api/health` | GET | Liveness and counters |
//! | `/` | GET | Embedded dashboard page |
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use therm_dashboard::{DashboardConfig, DashboardServer};
//! use therm_store::ReadingStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DashboardConfig::default();
//!     let store = Arc::new(ReadingStore::open("readings.db").expect("open store"));
//!
//!     let server = DashboardServer::new(config, store);
//!     // server.serve("0.0.0.0:3000".parse().unwrap()).await.unwrap();
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod page;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use config::DashboardConfig;
pub use error::{ApiError, ApiResult};
pub use server::DashboardServer;
pub use state::AppState;
