//! HTTP request handlers for the temperature API.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use therm_proto::{
    DevicesResponse, HealthResponse, InsertResponse, ListMeta, ListResponse, NewReading,
};
use therm_store::ListParams;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

/// Page size used when the caller does not supply a `limit`.
pub const DEFAULT_LIMIT: u64 = 100;

/// Hard ceiling on page size, regardless of what the caller asks for.
pub const MAX_LIMIT: u64 = 1000;

/// Query parameters for reading lists.
///
/// Fields stay raw strings so a malformed value falls back to its default
/// instead of rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct ReadingsQuery {
    /// Maximum number of readings to return.
    pub limit: Option<String>,
    /// Number of newest readings to skip.
    pub offset: Option<String>,
    /// Filter by device identifier.
    pub device_id: Option<String>,
    /// Deprecated alias for `device_id`, kept for older probes.
    pub location: Option<String>,
}

impl ReadingsQuery {
    /// Page size after defaulting and clamping to [`MAX_LIMIT`].
    #[must_use]
    pub fn effective_limit(&self) -> u64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT)
    }

    /// Offset after defaulting. Negative or garbage values become zero.
    #[must_use]
    pub fn effective_offset(&self) -> u64 {
        self.offset
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }

    /// Device filter. `device_id` wins when both it and `location` are set.
    #[must_use]
    pub fn effective_device(&self) -> Option<&str> {
        self.device_id.as_deref().or(self.location.as_deref())
    }
}

/// Handle POST /api - store one temperature reading.
///
/// The body is taken as loose JSON so that validation failures produce the
/// canonical error message rather than a deserializer rejection.
pub async fn insert_reading(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<InsertResponse>)> {
    let reading = NewReading::from_json(&body)?;
    let id = state.store().insert(&reading)?;
    info!(id = id.as_i64(), total = state.record_ingest(), "stored reading");
    Ok((StatusCode::CREATED, Json(InsertResponse::new(id))))
}

/// Handle GET /api - newest-first page of readings.
pub async fn list_readings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReadingsQuery>,
) -> ApiResult<Json<ListResponse>> {
    let limit = query.effective_limit();
    let offset = query.effective_offset();

    let mut params = ListParams::new(limit, offset);
    if let Some(device) = query.effective_device() {
        params = params.with_device_id(device);
    }

    let page = state.store().list(&params)?;
    let meta = ListMeta::new(page.total, limit, offset);
    Ok(Json(ListResponse::new(page.readings, meta)))
}

/// Handle GET /api/devices - known devices, most recently heard from first.
pub async fn list_devices(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DevicesResponse>> {
    let devices = state.store().devices()?;
    Ok(Json(DevicesResponse::new(devices)))
}

/// Handle GET /api/health - liveness plus basic counters.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.uptime_secs(),
        total_readings: state.store().count_all()?,
    }))
}
