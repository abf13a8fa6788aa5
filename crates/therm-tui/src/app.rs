//! Application state for the Thermolog TUI

use therm_chart::{Directive, DisplayPoint, RefreshState};

/// Where the charted points came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// No fetch has completed yet.
    Connecting,
    /// Points fetched from the hub.
    Live,
    /// Generated placeholder points.
    Synthetic,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Is the app running
    pub running: bool,

    /// Charted points, oldest first
    pub points: Vec<DisplayPoint>,

    /// Origin of the charted points
    pub source: DataSource,

    /// Auto-refresh configuration
    pub refresh: RefreshState,

    /// Index of the inspected point, if any
    pub cursor: Option<usize>,

    /// Last fetch error, shown alongside the placeholder data
    pub error: Option<String>,

    /// Last update timestamp
    pub last_update: Option<i64>,

    /// Hub endpoint the data comes from
    pub endpoint: String,

    /// Device filter, `None` charts all devices
    pub device: Option<String>,

    /// Device ids reported by the hub, for filter cycling
    pub devices: Vec<String>,

    /// Timer actions produced by refresh transitions, drained each loop
    pub pending_directives: Vec<Directive>,

    /// Set when a fetch should be started, drained each loop
    pub fetch_requested: bool,
}

impl App {
    pub fn new(endpoint: String, device: Option<String>) -> Self {
        Self {
            running: true,
            points: Vec::new(),
            source: DataSource::Connecting,
            refresh: RefreshState::default(),
            cursor: None,
            error: None,
            last_update: None,
            endpoint,
            device,
            devices: Vec::new(),
            pending_directives: Vec::new(),
            fetch_requested: false,
        }
    }

    /// Replace the chart with points fetched from the hub.
    pub fn show_live(&mut self, points: Vec<DisplayPoint>) {
        self.points = points;
        self.source = DataSource::Live;
        self.error = None;
        self.touch();
    }

    /// Replace the chart with generated placeholder points.
    pub fn show_synthetic(&mut self, points: Vec<DisplayPoint>, error: Option<String>) {
        self.points = points;
        self.source = DataSource::Synthetic;
        self.error = error;
        self.touch();
    }

    fn touch(&mut self) {
        self.last_update = Some(chrono::Utc::now().timestamp_millis());
        self.cursor = self.cursor.filter(|&i| i < self.points.len());
    }

    /// Flip auto-refresh on or off.
    pub fn toggle_refresh(&mut self) {
        let (next, directives) = self.refresh.toggle();
        self.refresh = next;
        self.pending_directives.extend(directives);
    }

    /// Step to the next supported refresh interval.
    pub fn cycle_refresh_interval(&mut self) {
        let (next, directives) = self.refresh.cycle_interval();
        self.refresh = next;
        self.pending_directives.extend(directives);
    }

    /// Ask the main loop to start a fetch.
    pub fn request_fetch(&mut self) {
        self.fetch_requested = true;
    }

    /// Step the device filter through the known devices, then back to all.
    ///
    /// A filter naming a device the hub no longer reports also steps
    /// back to all.
    pub fn cycle_device(&mut self) {
        if self.devices.is_empty() {
            return;
        }
        self.device = match &self.device {
            None => Some(self.devices[0].clone()),
            Some(current) => self
                .devices
                .iter()
                .position(|d| d == current)
                .and_then(|i| self.devices.get(i + 1))
                .cloned(),
        };
        self.request_fetch();
    }

    pub fn take_directives(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.pending_directives)
    }

    pub fn take_fetch_request(&mut self) -> bool {
        std::mem::take(&mut self.fetch_requested)
    }

    /// Move the inspection cursor one point towards the oldest reading.
    pub fn select_prev(&mut self) {
        match self.cursor {
            Some(i) if i > 0 => self.cursor = Some(i - 1),
            Some(_) => {}
            None => self.cursor = self.points.len().checked_sub(1),
        }
    }

    /// Move the inspection cursor one point towards the newest reading.
    pub fn select_next(&mut self) {
        match self.cursor {
            Some(i) if i + 1 < self.points.len() => self.cursor = Some(i + 1),
            Some(_) => {}
            None => self.cursor = self.points.len().checked_sub(1),
        }
    }

    pub fn selected(&self) -> Option<&DisplayPoint> {
        self.cursor.and_then(|i| self.points.get(i))
    }

    /// The newest charted point.
    pub fn latest(&self) -> Option<&DisplayPoint> {
        self.points.last()
    }
}
