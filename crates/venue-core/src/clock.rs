//! Monotonic clock for event timestamps.
//!
//! `t_accept` and `t_complete` on every event are microsecond samples of
//! this clock, anchored at engine construction. A monotonic source (not
//! wall clock) keeps `t_complete >= t_accept` even across system clock
//! adjustments.

use std::time::Instant;

/// Monotonic microsecond clock.
#[derive(Debug, Clone)]
pub struct Clock {
    epoch: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Clock {
            epoch: Instant::now(),
        }
    }

    /// Microseconds elapsed since this clock was created.
    pub fn now_micros(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}
