//! Temperature sensor backends.
//!
//! The probe reads a DS18B20 through the Linux 1-Wire sysfs interface, or a
//! synthetic random walk when no hardware is attached.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::SensorConfig;
use crate::error::ProbeError;

/// Directory where the kernel exposes 1-Wire slave devices.
const W1_DEVICES_DIR: &str = "/sys/bus/w1/devices";

/// Family code prefix for DS18B20 sensors.
const DS18B20_PREFIX: &str = "28-";

/// A source of temperature readings.
pub trait TemperatureSensor: Send + std::fmt::Debug {
    /// Short backend name used in logs.
    fn name(&self) -> &str;

    /// Take one reading in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns an error if the sensor cannot be read or its output cannot
    /// be parsed.
    fn read_celsius(&mut self) -> Result<f64, ProbeError>;
}

/// Build the sensor backend selected by the configuration.
///
/// # Errors
///
/// Returns an error for an unknown backend, or when the `w1` backend finds
/// no sensor on the bus.
pub fn create_sensor(config: &SensorConfig) -> Result<Box<dyn TemperatureSensor>, ProbeError> {
    match config.backend.as_str() {
        "synthetic" => Ok(Box::new(SyntheticSensor::new())),
        "w1" => {
            let sensor = match &config.w1_device {
                Some(device) => W1Sensor::for_device(device),
                None => W1Sensor::discover()?,
            };
            Ok(Box::new(sensor))
        }
        other => Err(ProbeError::Config(format!(
            "unknown sensor backend '{other}'"
        ))),
    }
}

/// Round to two decimal places, the precision reported upstream.
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Random walk around room temperature, for running without hardware.
#[derive(Debug)]
pub struct SyntheticSensor {
    rng: StdRng,
    current: f64,
}

impl SyntheticSensor {
    /// Create a sensor starting at room temperature.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            current: 21.0,
        }
    }
}

impl Default for SyntheticSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureSensor for SyntheticSensor {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn read_celsius(&mut self) -> Result<f64, ProbeError> {
        self.current = (self.current + self.rng.gen_range(-0.25..=0.25)).clamp(15.0, 30.0);
        Ok(self.current)
    }
}

/// DS18B20 sensor read through `/sys/bus/w1/devices/<id>/w1_slave`.
#[derive(Debug)]
pub struct W1Sensor {
    slave_path: PathBuf,
    device_id: String,
}

impl W1Sensor {
    /// Use an explicit 1-Wire device id.
    #[must_use]
    pub fn for_device(device_id: &str) -> Self {
        let slave_path = Path::new(W1_DEVICES_DIR).join(device_id).join("w1_slave");
        Self {
            slave_path,
            device_id: device_id.to_string(),
        }
    }

    /// Scan the bus and use the first DS18B20 found.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus directory cannot be read or holds no
    /// DS18B20 entry.
    pub fn discover() -> Result<Self, ProbeError> {
        let entries = std::fs::read_dir(W1_DEVICES_DIR).map_err(|e| {
            ProbeError::Sensor(format!("cannot scan {W1_DEVICES_DIR}: {e}"))
        })?;

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(DS18B20_PREFIX) {
                info!(device = %name, "found DS18B20 sensor");
                return Ok(Self::for_device(&name));
            }
        }

        Err(ProbeError::Sensor(format!(
            "no DS18B20 device found under {W1_DEVICES_DIR}, check wiring"
        )))
    }
}

impl TemperatureSensor for W1Sensor {
    fn name(&self) -> &str {
        &self.device_id
    }

    fn read_celsius(&mut self) -> Result<f64, ProbeError> {
        let raw = std::fs::read_to_string(&self.slave_path).map_err(|e| {
            ProbeError::Sensor(format!(
                "failed to read {}: {e}",
                self.slave_path.display()
            ))
        })?;

        parse_w1_slave(&raw)
    }
}

/// Parse the kernel's `w1_slave` report.
///
/// The report is two lines: the first ends in `YES` when the CRC matched,
/// the second carries the temperature in millidegrees after `t=`.
fn parse_w1_slave(raw: &str) -> Result<f64, ProbeError> {
    let mut lines = raw.lines();

    let crc_line = lines
        .next()
        .ok_or_else(|| ProbeError::Sensor("empty sensor report".to_string()))?;
    if !crc_line.trim_end().ends_with("YES") {
        return Err(ProbeError::Sensor("CRC check failed".to_string()));
    }

    let data_line = lines
        .next()
        .ok_or_else(|| ProbeError::Sensor("sensor report missing data line".to_string()))?;
    let millidegrees = data_line
        .rsplit_once("t=")
        .ok_or_else(|| ProbeError::Sensor("sensor report missing t= field".to_string()))?
        .1
        .trim();
    let millidegrees: i32 = millidegrees
        .parse()
        .map_err(|_| ProbeError::Sensor(format!("invalid temperature value '{millidegrees}'")))?;

    Ok(f64::from(millidegrees) / 1000.0)
}
