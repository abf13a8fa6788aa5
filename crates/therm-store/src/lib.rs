//! # therm-store
//!
//! SQLite persistence for temperature readings: one `readings` table with a
//! timestamp index, schema migrations gated on `PRAGMA user_version`, and a
//! [`ReadingStore`] exposing insert, newest-first paginated listing, and
//! per-device summaries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod migrations;
pub mod store;

pub use error::{Error, Result};
pub use store::{ListParams, Page, ReadingStore};
