//! Core types for the Thermolog readings API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProtoError;

/// Inclusive lower bound accepted for a temperature, in degrees Celsius.
pub const TEMP_MIN: f64 = -50.0;

/// Inclusive upper bound accepted for a temperature, in degrees Celsius.
pub const TEMP_MAX: f64 = 100.0;

/// Device identifier recorded when a submission does not name one.
pub const DEFAULT_DEVICE_ID: &str = "unknown";

/// Wire message for every temperature rejection, regardless of whether the
/// field was missing, non-numeric, or out of range.
const TEMPERATURE_MESSAGE: &str = "temperature must be a number between -50 and 100";

/// Server-assigned identifier for a persisted reading.
///
/// Ids are monotonically increasing: a later insert always receives a
/// strictly larger id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingId(i64);

impl ReadingId {
    /// Wrap a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying row id.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ReadingId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ReadingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One persisted temperature observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Server-assigned id.
    pub id: ReadingId,
    /// Observed temperature in degrees Celsius.
    pub temperature: f64,
    /// When the observation was taken (UTC).
    pub timestamp: DateTime<Utc>,
    /// Identifier of the reporting device.
    pub device_id: String,
    /// Opaque structured payload supplied by the device, if any.
    pub metadata: Option<serde_json::Value>,
}

/// A reading submitted for insertion; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    /// Observed temperature in degrees Celsius.
    ///
    /// Must lie within [`TEMP_MIN`]..=[`TEMP_MAX`]; the endpoint rejects
    /// anything else before touching storage.
    pub temperature: f64,
    /// Reporting device; the store records [`DEFAULT_DEVICE_ID`] when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Observation time; the store records the insertion time when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Opaque structured payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl NewReading {
    /// Create a submission for the given temperature.
    #[must_use]
    pub const fn new(temperature: f64) -> Self {
        Self {
            temperature,
            device_id: None,
            timestamp: None,
            metadata: None,
        }
    }

    /// Set the reporting device.
    #[must_use]
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Set an explicit observation time.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach a metadata payload.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Parse and validate a submission from a raw JSON body.
    ///
    /// Field handling follows the ingestion contract: `temperature` is
    /// required, numeric, and range-checked; `timestamp` must be RFC 3339
    /// when present; `metadata` passes through untouched; unknown fields are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::Validation`] describing the first offending
    /// field. A bad temperature always carries the canonical range message.
    pub fn from_json(body: &serde_json::Value) -> Result<Self, ProtoError> {
        let temperature = body
            .get("temperature")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| ProtoError::Validation(TEMPERATURE_MESSAGE.to_string()))?;
        validate_temperature(temperature)?;

        let device_id = match body.get("device_id") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(ProtoError::Validation(
                    "device_id must be a string".to_string(),
                ));
            }
        };

        let timestamp = match body.get("timestamp") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(
                DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| {
                        ProtoError::Validation(format!(
                            "timestamp must be an RFC 3339 date-time: {e}"
                        ))
                    })?,
            ),
            Some(_) => {
                return Err(ProtoError::Validation(
                    "timestamp must be an RFC 3339 date-time".to_string(),
                ));
            }
        };

        let metadata = match body.get("metadata") {
            None | Some(serde_json::Value::Null) => None,
            Some(v) => Some(v.clone()),
        };

        Ok(Self {
            temperature,
            device_id,
            timestamp,
            metadata,
        })
    }
}

/// Check a temperature against the accepted range.
///
/// # Errors
///
/// Returns [`ProtoError::Validation`] with the canonical range message when
/// the value is non-finite or outside [`TEMP_MIN`]..=[`TEMP_MAX`].
pub fn validate_temperature(temperature: f64) -> Result<(), ProtoError> {
    if temperature.is_finite() && (TEMP_MIN..=TEMP_MAX).contains(&temperature) {
        Ok(())
    } else {
        Err(ProtoError::Validation(TEMPERATURE_MESSAGE.to_string()))
    }
}

/// Body returned by a successful insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResponse {
    /// Always `true` on this path; failures use [`ErrorResponse`].
    pub ok: bool,
    /// Id assigned to the stored reading.
    pub id: ReadingId,
}

impl InsertResponse {
    /// Success body for the given id.
    #[must_use]
    pub const fn new(id: ReadingId) -> Self {
        Self { ok: true, id }
    }
}

/// Pagination metadata accompanying a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    /// Total rows matching the filter, ignoring pagination.
    pub total: u64,
    /// Effective page size after clamping.
    pub limit: u64,
    /// Requested offset.
    pub offset: u64,
    /// Whether rows remain past this page.
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl ListMeta {
    /// Compute metadata for one page.
    ///
    /// `has_more` is true exactly when `offset + limit < total`.
    #[must_use]
    pub const fn new(total: u64, limit: u64, offset: u64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// Body returned by a successful list call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    /// Always `true` on this path; failures use [`ErrorResponse`].
    pub ok: bool,
    /// Readings for this page, newest first.
    pub data: Vec<Reading>,
    /// Pagination metadata.
    pub meta: ListMeta,
}

impl ListResponse {
    /// Success body for one page of readings.
    #[must_use]
    pub fn new(data: Vec<Reading>, meta: ListMeta) -> Self {
        Self {
            ok: true,
            data,
            meta,
        }
    }
}

/// Summary of one reporting device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    /// Device identifier.
    pub device_id: String,
    /// Number of stored readings for this device.
    pub readings: u64,
    /// Timestamp of the device's newest reading.
    pub last_seen: DateTime<Utc>,
}

/// Body returned by the device listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    /// Always `true` on this path; failures use [`ErrorResponse`].
    pub ok: bool,
    /// One summary per distinct device, most recently seen first.
    pub data: Vec<DeviceSummary>,
}

impl DevicesResponse {
    /// Success body for the device listing.
    #[must_use]
    pub fn new(data: Vec<DeviceSummary>) -> Self {
        Self { ok: true, data }
    }
}

/// Body returned by the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status message, `"ok"` when serving.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_seconds: u64,
    /// Total readings stored.
    pub total_readings: u64,
}

/// Body carried by every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub ok: bool,
    /// Human-readable failure message.
    pub error: String,
}

impl ErrorResponse {
    /// Failure body with the given message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(-50.0; "lower bound")]
    #[test_case(100.0; "upper bound")]
    #[test_case(0.0; "zero")]
    #[test_case(23.5; "room temperature")]
    fn test_validate_temperature_accepts(t: f64) {
        assert!(validate_temperature(t).is_ok());
    }

    #[test_case(-50.001; "below lower bound")]
    #[test_case(100.001; "above upper bound")]
    #[test_case(150.0; "far above")]
    #[test_case(f64::NAN; "nan")]
    #[test_case(f64::INFINITY; "infinity")]
    fn test_validate_temperature_rejects(t: f64) {
        assert!(validate_temperature(t).is_err());
    }

    #[test]
    fn test_validation_message_is_canonical() {
        let err = validate_temperature(150.0).unwrap_err();
        assert_eq!(
            err.message(),
            "temperature must be a number between -50 and 100"
        );
    }

    #[test]
    fn test_from_json_full_body() {
        let body = json!({
            "temperature": 23.5,
            "device_id": "pico_w_001",
            "timestamp": "2024-06-01T12:00:00Z",
            "metadata": {"battery": 87}
        });

        let reading = NewReading::from_json(&body).unwrap();
        assert!((reading.temperature - 23.5).abs() < f64::EPSILON);
        assert_eq!(reading.device_id.as_deref(), Some("pico_w_001"));
        assert_eq!(
            reading.timestamp.unwrap().to_rfc3339(),
            "2024-06-01T12:00:00+00:00"
        );
        assert_eq!(reading.metadata, Some(json!({"battery": 87})));
    }

    #[test]
    fn test_from_json_temperature_only() {
        let reading = NewReading::from_json(&json!({"temperature": -10})).unwrap();
        assert!((reading.temperature - -10.0).abs() < f64::EPSILON);
        assert!(reading.device_id.is_none());
        assert!(reading.timestamp.is_none());
        assert!(reading.metadata.is_none());
    }

    #[test]
    fn test_from_json_missing_temperature() {
        let err = NewReading::from_json(&json!({"device_id": "x"})).unwrap_err();
        assert_eq!(
            err.message(),
            "temperature must be a number between -50 and 100"
        );
    }

    #[test]
    fn test_from_json_non_numeric_temperature() {
        let err = NewReading::from_json(&json!({"temperature": "hot"})).unwrap_err();
        assert_eq!(
            err.message(),
            "temperature must be a number between -50 and 100"
        );
    }

    #[test]
    fn test_from_json_out_of_range_temperature() {
        let err = NewReading::from_json(&json!({"temperature": 150})).unwrap_err();
        assert_eq!(
            err.message(),
            "temperature must be a number between -50 and 100"
        );
    }

    #[test]
    fn test_from_json_bad_timestamp() {
        let body = json!({"temperature": 20.0, "timestamp": "yesterday"});
        let err = NewReading::from_json(&body).unwrap_err();
        assert!(err.message().starts_with("timestamp must be"));
    }

    #[test]
    fn test_from_json_non_string_device_id() {
        let body = json!({"temperature": 20.0, "device_id": 42});
        let err = NewReading::from_json(&body).unwrap_err();
        assert_eq!(err.message(), "device_id must be a string");
    }

    #[test]
    fn test_from_json_null_fields_are_absent() {
        let body = json!({
            "temperature": 20.0,
            "device_id": null,
            "timestamp": null,
            "metadata": null
        });
        let reading = NewReading::from_json(&body).unwrap();
        assert!(reading.device_id.is_none());
        assert!(reading.timestamp.is_none());
        assert!(reading.metadata.is_none());
    }

    #[test_case(1, 10, 0, false; "single reading fits")]
    #[test_case(11, 10, 0, true; "one row past the page")]
    #[test_case(10, 10, 0, false; "page exactly covers total")]
    #[test_case(100, 10, 80, true; "middle page")]
    #[test_case(100, 10, 90, false; "final page")]
    #[test_case(0, 100, 0, false; "empty table")]
    fn test_list_meta_has_more(total: u64, limit: u64, offset: u64, expected: bool) {
        assert_eq!(ListMeta::new(total, limit, offset).has_more, expected);
    }

    #[test]
    fn test_list_meta_offset_saturates() {
        let meta = ListMeta::new(50, 1000, u64::MAX);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_list_meta_wire_key_is_camel_case() {
        let meta = ListMeta::new(1, 100, 0);
        let json = serde_json::to_value(meta).unwrap();
        assert!(json.get("hasMore").is_some());
        assert!(json.get("has_more").is_none());
    }

    #[test]
    fn test_reading_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&ReadingId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_insert_response_shape() {
        let json = serde_json::to_value(InsertResponse::new(ReadingId::new(1))).unwrap();
        assert_eq!(json, json!({"ok": true, "id": 1}));
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("database unavailable")).unwrap();
        assert_eq!(json, json!({"ok": false, "error": "database unavailable"}));
    }

    #[test]
    fn test_new_reading_builder() {
        let reading = NewReading::new(21.0)
            .with_device_id("bench-1")
            .with_metadata(json!({"firmware": "1.2"}));

        assert_eq!(reading.device_id.as_deref(), Some("bench-1"));
        assert!(reading.timestamp.is_none());
        assert_eq!(reading.metadata, Some(json!({"firmware": "1.2"})));
    }

    #[test]
    fn test_new_reading_omits_empty_fields_on_wire() {
        let json = serde_json::to_value(NewReading::new(21.0)).unwrap();
        assert_eq!(json, json!({"temperature": 21.0}));
    }
}
