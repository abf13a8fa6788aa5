//! # therm-proto
//!
//! Shared types for the Thermolog readings API: the persisted [`Reading`],
//! the [`NewReading`] submission with its temperature validation, and the
//! response envelopes the HTTP surface speaks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::ProtoError;
pub use types::{
    DEFAULT_DEVICE_ID, DeviceSummary, DevicesResponse, ErrorResponse, HealthResponse,
    InsertResponse, ListMeta, ListResponse, NewReading, Reading, ReadingId, TEMP_MAX, TEMP_MIN,
    validate_temperature,
};
