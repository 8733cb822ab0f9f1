use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Repeating timer driven by the event loop's ticks
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    last_fired: Instant,
}

impl IntervalTimer {
    /// Start a timer whose first firing is one interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_fired: now,
        }
    }

    /// Returns true (and restarts the interval) if a full interval has passed.
    /// Missed intervals collapse into a single firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_fired) >= self.interval {
            self.last_fired = now;
            true
        } else {
            false
        }
    }
}
