//! Data fetching for the Thermolog TUI
//!
//! Read-only against the hub HTTP API. A failed fetch reports an error
//! event; the main loop falls back to placeholder data so the chart
//! always has something to show.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use therm_chart::{DisplayPoint, TimerPort, synthetic_readings, to_display};
use therm_client::{ApiClient, ListQuery};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::events::{AppEvent, DataEvent};

/// Data client that fetches readings from the hub
#[derive(Clone)]
pub struct DataClient {
    client: ApiClient,
    limit: u64,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl DataClient {
    pub fn new(endpoint: &str, limit: u64, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            client: ApiClient::new(endpoint),
            limit,
            tx,
        }
    }

    /// Fetch one display series and report the outcome as an event.
    ///
    /// Also refreshes the device list; its failure is logged and
    /// otherwise ignored so a missing rollup never blocks the chart.
    pub async fn fetch(&self, device: Option<String>) {
        let result = match &device {
            None => self.client.fetch_display(self.limit).await,
            Some(device) => {
                let query = ListQuery::newest(self.limit).with_device_id(device.clone());
                self.client.list(&query).await.map(|page| to_display(&page.data))
            }
        };

        match result {
            Ok(points) => {
                debug!(points = points.len(), "fetched readings");
                self.send(DataEvent::Live(points));
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                self.send(DataEvent::Failed(e.to_string()));
            }
        }

        match self.client.devices().await {
            Ok(devices) => {
                let ids = devices.into_iter().map(|d| d.device_id).collect();
                self.send(DataEvent::Devices(ids));
            }
            Err(e) => {
                debug!(error = %e, "device list fetch failed");
            }
        }
    }

    fn send(&self, event: DataEvent) {
        let _ = self.tx.send(AppEvent::DataUpdate(event));
    }
}

/// Generate the placeholder series shown when no live data is available.
pub fn placeholder_points() -> Vec<DisplayPoint> {
    let mut rng = StdRng::from_entropy();
    to_display(&synthetic_readings(&mut rng, chrono::Utc::now()))
}

/// Update application state from data events
pub fn apply_data_event(app: &mut crate::app::App, event: DataEvent) {
    match event {
        DataEvent::Live(points) => {
            app.show_live(points);
        }
        DataEvent::Placeholder(points) => {
            app.show_synthetic(points, None);
        }
        DataEvent::Failed(message) => {
            app.show_synthetic(placeholder_points(), Some(message));
        }
        DataEvent::Devices(ids) => {
            app.devices = ids;
        }
    }
}

/// Periodic fetch timer backing the refresh scheduler
///
/// At most one ticker task exists; arming replaces it. Cancelling stops
/// future firings only, a fetch already in flight still completes.
pub struct FetchTimer {
    tx: mpsc::UnboundedSender<AppEvent>,
    handle: Option<JoinHandle<()>>,
}

impl FetchTimer {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx, handle: None }
    }
}

impl TimerPort for FetchTimer {
    fn arm(&mut self, period: Duration) {
        self.cancel();
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick fires immediately; skip it so the schedule
            // starts one full period from now.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(AppEvent::FetchDue).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for FetchTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
