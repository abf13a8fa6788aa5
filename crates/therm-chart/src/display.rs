//! Normalization of fetched readings into a chart-ready sequence.

use chrono::{DateTime, Local, Utc};
use therm_proto::{Reading, ReadingId};

/// One chart-ready point derived from a stored reading.
///
/// The display sequence is recomputed wholesale on every fetch; points
/// are never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPoint {
    /// Position in the display sequence, 0 = oldest.
    pub index: usize,

    /// Temperature in degrees Celsius.
    pub temperature: f64,

    /// Local wall-clock label in `HH:MM:SS` form.
    pub time_label: String,

    /// Id of the source reading.
    pub reading_id: ReadingId,

    /// Device that reported the source reading.
    pub device_id: String,
}

/// Order readings oldest to newest and assign sequence indices.
///
/// Sorting is by `(timestamp, id)` ascending and stable, so running the
/// transform over already-ordered input assigns identical indices.
#[must_use]
pub fn to_display(readings: &[Reading]) -> Vec<DisplayPoint> {
    let mut ordered: Vec<&Reading> = readings.iter().collect();
    ordered.sort_by_key(|reading| (reading.timestamp, reading.id));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, reading)| DisplayPoint {
            index,
            temperature: reading.temperature,
            time_label: time_label(reading.timestamp),
            reading_id: reading.id,
            device_id: reading.device_id.clone(),
        })
        .collect()
}

/// Format a timestamp as a local-time `HH:MM:SS` label.
#[must_use]
pub fn time_label(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}
