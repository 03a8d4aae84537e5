//! Tick timing for the interactive loop.

use std::time::{Duration, Instant};

/// Fires at a fixed interval that can be changed between ticks.
///
/// Changing the interval restarts the period from the moment of the change.
/// Missed beats are never replayed: a late tick fires once and the next one
/// is measured from when it actually ran.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(interval_ms: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_millis(u64::from(interval_ms)),
            last: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last) >= self.interval
    }

    /// Time left before the next beat; zero if already due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Records that a tick ran at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last = now;
    }

    pub fn reschedule(&mut self, interval_ms: u32, now: Instant) {
        self.interval = Duration::from_millis(u64::from(interval_ms));
        self.last = now;
    }

    /// Drops time spent paused so resuming does not fire a catch-up tick.
    pub fn resume(&mut self, now: Instant) {
        self.last = now;
    }
}
