//! Periodic refresh as an explicit state machine.
//!
//! Refresh configuration lives in a plain [`RefreshState`] value and
//! every transition is a pure function returning the next state plus the
//! timer [`Directive`]s it implies. Actually arming or cancelling an OS
//! timer happens behind the [`TimerPort`] seam, so UIs can drive a real
//! timer task while tests record calls.

use std::time::Duration;

use tracing::debug;

use crate::error::{Result, SchedulerError};

/// The supported refresh intervals, in seconds.
pub const REFRESH_INTERVALS: [u64; 5] = [5, 10, 30, 60, 300];

/// Interval used before the user picks one.
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Refresh configuration as seen by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshState {
    /// Whether periodic refresh is on.
    pub enabled: bool,

    /// Period between refreshes, in seconds.
    pub interval_secs: u64,
}

impl Default for RefreshState {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

/// One timer action implied by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Cancel the outstanding timer, if any.
    Cancel,

    /// Arm a periodic timer with the given period.
    Arm(Duration),
}

impl RefreshState {
    /// Replace the whole configuration.
    ///
    /// Every transition cancels the prior timer first, then arms a new
    /// one iff refresh is enabled, so reconfiguring while armed replaces
    /// the single outstanding timer rather than stacking a second one.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::UnsupportedInterval`] when the interval
    /// is not in [`REFRESH_INTERVALS`]; the state is left unchanged.
    pub fn configure(self, enabled: bool, interval_secs: u64) -> Result<(Self, Vec<Directive>)> {
        if !REFRESH_INTERVALS.contains(&interval_secs) {
            return Err(SchedulerError::UnsupportedInterval {
                seconds: interval_secs,
            });
        }
        let next = Self {
            enabled,
            interval_secs,
        };
        Ok((next, next.directives()))
    }

    /// Flip the enabled flag.
    ///
    /// Disabling stops future firings only; a fetch already in flight is
    /// not cancelled and will still overwrite the display sequence.
    #[must_use]
    pub fn toggle(self) -> (Self, Vec<Directive>) {
        let next = Self {
            enabled: !self.enabled,
            ..self
        };
        (next, next.directives())
    }

    /// Step to the next supported interval, wrapping at the end.
    ///
    /// An interval outside the supported set (possible only by building
    /// the state by hand) cycles to the first supported one.
    #[must_use]
    pub fn cycle_interval(self) -> (Self, Vec<Directive>) {
        let position = REFRESH_INTERVALS
            .iter()
            .position(|&secs| secs == self.interval_secs);
        let next_index = position.map_or(0, |p| (p + 1) % REFRESH_INTERVALS.len());
        let next = Self {
            interval_secs: REFRESH_INTERVALS[next_index],
            ..self
        };
        (next, next.directives())
    }

    /// The configured period as a [`Duration`].
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    fn directives(self) -> Vec<Directive> {
        let mut directives = vec![Directive::Cancel];
        if self.enabled {
            directives.push(Directive::Arm(self.interval()));
        }
        directives
    }
}

/// Drives the single outstanding refresh timer.
pub trait TimerPort: Send {
    /// Arm (or re-arm) the periodic timer.
    fn arm(&mut self, period: Duration);

    /// Cancel the outstanding timer, if any.
    fn cancel(&mut self);
}

/// Apply a transition's directives to a timer port, in order.
pub fn apply_directives(timer: &mut impl TimerPort, directives: &[Directive]) {
    for directive in directives {
        match directive {
            Directive::Cancel => {
                debug!("Cancelling refresh timer");
                timer.cancel();
            }
            Directive::Arm(period) => {
                debug!(period_secs = period.as_secs(), "Arming refresh timer");
                timer.arm(*period);
            }
        }
    }
}

/// Timer port that records calls instead of scheduling, for tests.
#[derive(Debug, Default)]
pub struct RecordingTimer {
    calls: Vec<Directive>,
}

impl RecordingTimer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[Directive] {
        &self.calls
    }
}

impl TimerPort for RecordingTimer {
    fn arm(&mut self, period: Duration) {
        self.calls.push(Directive::Arm(period));
    }

    fn cancel(&mut self) {
        self.calls.push(Directive::Cancel);
    }
}
