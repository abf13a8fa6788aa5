//! Typed client for the Thermolog HTTP API.

use reqwest::Response;
use tracing::debug;

use therm_chart::{DisplayPoint, to_display};
use therm_proto::{
    DeviceSummary, DevicesResponse, ErrorResponse, HealthResponse, InsertResponse, ListResponse,
    NewReading, ReadingId,
};

use crate::error::{ClientError, Result};

/// Query options for listing readings.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Maximum readings to return; server defaults and caps apply.
    pub limit: Option<u64>,

    /// Readings to skip, newest first.
    pub offset: Option<u64>,

    /// Restrict to one device.
    pub device_id: Option<String>,
}

impl ListQuery {
    /// Query for the newest `limit` readings across all devices.
    #[must_use]
    pub const fn newest(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
            device_id: None,
        }
    }

    /// Restrict the query to one device.
    #[must_use]
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Skip the newest `offset` readings.
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(ref device_id) = self.device_id {
            pairs.push(("device_id", device_id.clone()));
        }
        pairs
    }
}

/// Client for one Thermolog hub.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the hub at `base_url`, e.g.
    /// `http://127.0.0.1:3000`. Trailing slashes are ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The hub this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Submit one reading and return its server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a rejecting status (422s
    /// and validation 400s included), or an unparseable body.
    pub async fn insert(&self, reading: &NewReading) -> Result<ReadingId> {
        let response = self
            .http
            .post(self.url("/api"))
            .json(reading)
            .send()
            .await?;
        let body: InsertResponse = decode(check(response).await?).await?;
        debug!(id = %body.id, "Submitted reading");
        Ok(body.id)
    }

    /// List readings, newest first, with pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a rejecting status, or an
    /// unparseable body.
    pub async fn list(&self, query: &ListQuery) -> Result<ListResponse> {
        let response = self
            .http
            .get(self.url("/api"))
            .query(&query.to_pairs())
            .send()
            .await?;
        decode(check(response).await?).await
    }

    /// Summaries of every device the hub has seen.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a rejecting status, or an
    /// unparseable body.
    pub async fn devices(&self) -> Result<Vec<DeviceSummary>> {
        let response = self.http.get(self.url("/api/devices")).send().await?;
        let body: DevicesResponse = decode(check(response).await?).await?;
        Ok(body.data)
    }

    /// Hub liveness and basic counters.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a rejecting status, or an
    /// unparseable body.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.http.get(self.url("/api/health")).send().await?;
        decode(check(response).await?).await
    }

    /// Fetch the newest `limit` readings as a chart-ready sequence,
    /// ordered oldest to newest with indices assigned.
    ///
    /// # Errors
    ///
    /// Any fetch or decode failure is returned as an error; callers
    /// decide whether to render a placeholder instead, and must surface
    /// the failure when they do.
    pub async fn fetch_display(&self, limit: u64) -> Result<Vec<DisplayPoint>> {
        let page = self.list(&ListQuery::newest(limit)).await?;
        Ok(to_display(&page.data))
    }
}

/// Turn a non-success response into [`ClientError::Api`], preferring the
/// body's error message over the bare status line.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| ClientError::Decode {
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slashes_are_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:3000///");
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
        assert_eq!(client.url("/api"), "http://127.0.0.1:3000/api");
    }

    #[test]
    fn test_list_query_pairs() {
        let query = ListQuery {
            limit: Some(50),
            offset: Some(100),
            device_id: Some("pico_w_001".into()),
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("limit", "50".to_owned()),
                ("offset", "100".to_owned()),
                ("device_id", "pico_w_001".to_owned()),
            ]
        );
    }

    #[test]
    fn test_list_query_omits_unset_fields() {
        assert!(ListQuery::default().to_pairs().is_empty());
        assert_eq!(
            ListQuery::newest(10).to_pairs(),
            vec![("limit", "10".to_owned())]
        );
    }
}
