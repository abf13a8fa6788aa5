//! Thermolog Terminal UI Library
//!
//! Read-only chart of recent temperature readings, rendered in the
//! terminal. Talks to the same HTTP API as the web dashboard.

pub mod app;
pub mod data;
pub mod events;
pub mod ui;
