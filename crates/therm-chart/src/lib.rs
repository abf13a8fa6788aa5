//! Chart-side building blocks for Thermolog UIs.
//!
//! This crate owns everything between a fetched batch of readings and
//! pixels on a screen:
//! - [`display`]: normalize readings into an ordered display sequence
//! - [`geometry`]: map the sequence to screen coordinates and hit-test
//!   the pointer against it
//! - [`scheduler`]: periodic refresh as an explicit state machine with
//!   an injectable timer port
//! - [`synth`]: procedurally generated placeholder series for when no
//!   live data is available
//!
//! Everything here is synchronous and side-effect free; driving timers
//! and fetching data belong to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod display;
pub mod error;
pub mod geometry;
pub mod scheduler;
pub mod synth;

pub use display::{DisplayPoint, to_display};
pub use error::{Result, SchedulerError};
pub use geometry::{HIT_THRESHOLD_PX, hit_test, polyline};
pub use scheduler::{Directive, REFRESH_INTERVALS, RefreshState, TimerPort, apply_directives};
pub use synth::{PLACEHOLDER_LEN, synthetic_readings};
