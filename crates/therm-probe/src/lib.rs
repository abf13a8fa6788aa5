//! Thermolog probe agent.
//!
//! Runs on a small always-on box next to the sensor, reads the temperature
//! on a fixed interval, and pushes each reading to a Thermolog server over
//! HTTP. A failed push is logged and dropped; the next cycle takes a fresh
//! reading.

pub mod config;
pub mod error;
pub mod sensor;

pub use config::{ProbeConfig, SensorConfig};
pub use error::ProbeError;
pub use sensor::{create_sensor, round_to_hundredths, SyntheticSensor, TemperatureSensor, W1Sensor};
