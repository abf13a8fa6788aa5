//! Shared state for the dashboard server.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use therm_store::ReadingStore;

use crate::config::DashboardConfig;

/// Shared state for the dashboard server.
#[derive(Debug)]
pub struct AppState {
    /// Dashboard configuration.
    config: Arc<DashboardConfig>,
    /// Backing store for readings.
    store: Arc<ReadingStore>,
    /// Readings accepted since this process started.
    ingested: AtomicU64,
    /// Server start time.
    start_time: Instant,
}

impl AppState {
    /// Create state around an open store.
    pub fn new(config: DashboardConfig, store: Arc<ReadingStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            ingested: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Get the backing store.
    #[must_use]
    pub fn store(&self) -> &ReadingStore {
        &self.store
    }

    /// Count one accepted reading; returns the new process-lifetime total.
    pub fn record_ingest(&self) -> u64 {
        self.ingested.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Readings accepted since this process started.
    #[must_use]
    pub fn ingested_count(&self) -> u64 {
        self.ingested.load(Ordering::Relaxed)
    }

    /// Server uptime in seconds.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state() -> AppState {
        let store = Arc::new(ReadingStore::open_in_memory().expect("open store"));
        AppState::new(DashboardConfig::default(), store)
    }

    #[test]
    fn test_state_creation() {
        let state = make_state();

        assert_eq!(state.ingested_count(), 0);
        assert_eq!(state.config().bind_addr.port(), 3000);
    }

    #[test]
    fn test_ingest_counter() {
        let state = make_state();

        assert_eq!(state.record_ingest(), 1);
        assert_eq!(state.record_ingest(), 2);
        assert_eq!(state.ingested_count(), 2);
    }

    #[test]
    fn test_uptime_starts_near_zero() {
        let state = make_state();
        assert!(state.uptime_secs() < 2);
    }
}
