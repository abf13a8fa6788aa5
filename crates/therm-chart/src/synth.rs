//! Procedurally generated placeholder readings.
//!
//! When a UI has nothing live to show it can render one of these series
//! instead of an empty chart. Callers must make the substitution visible;
//! the generator itself never stands in for a failed fetch silently.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use therm_proto::{Reading, ReadingId};

use crate::geometry::{AXIS_MAX_TEMP, AXIS_MIN_TEMP};

/// Number of points in a placeholder series.
pub const PLACEHOLDER_LEN: usize = 60;

/// Device id stamped on placeholder readings.
pub const SYNTHETIC_DEVICE_ID: &str = "synthetic";

/// Midpoint of the generated pseudo-cycle, in degrees Celsius.
const BASE_TEMP: f64 = 32.0;

/// Peak deviation of the sinusoidal component.
const WAVE_AMPLITUDE: f64 = 6.0;

/// Bound on the per-point uniform jitter.
const JITTER_MAX: f64 = 0.8;

/// Bound on each random-walk drift step.
const DRIFT_STEP: f64 = 0.15;

/// Generate a minute-spaced placeholder series ending at `now`.
///
/// One full sinusoidal cycle over [`PLACEHOLDER_LEN`] points, with
/// bounded jitter on every point and a slow random-walk drift across the
/// series. Each temperature is clamped to the visible chart axis. The
/// output is fully determined by `rng` and `now`, so a seeded generator
/// reproduces the same series.
pub fn synthetic_readings<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Vec<Reading> {
    let mut drift = 0.0_f64;
    let mut readings = Vec::with_capacity(PLACEHOLDER_LEN);

    for i in 0..PLACEHOLDER_LEN {
        drift += rng.gen_range(-DRIFT_STEP..=DRIFT_STEP);
        let phase = std::f64::consts::TAU * i as f64 / PLACEHOLDER_LEN as f64;
        let jitter = rng.gen_range(-JITTER_MAX..=JITTER_MAX);
        let temperature = (BASE_TEMP + WAVE_AMPLITUDE * phase.sin() + jitter + drift)
            .clamp(AXIS_MIN_TEMP, AXIS_MAX_TEMP);

        let age_minutes = (PLACEHOLDER_LEN - 1 - i) as i64;
        readings.push(Reading {
            id: ReadingId::new(i as i64 + 1),
            temperature,
            timestamp: now - Duration::minutes(age_minutes),
            device_id: SYNTHETIC_DEVICE_ID.to_owned(),
            metadata: None,
        });
    }

    readings
}
