//! HTTP client for the Thermolog readings API.
//!
//! [`ApiClient`] wraps a `reqwest` client pointed at one hub and exposes
//! typed calls for every endpoint. All failures come back as explicit
//! [`ClientError`] values; nothing here substitutes placeholder data on
//! error, that call belongs to the UI.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{ApiClient, ListQuery};
pub use error::{ClientError, Result};
