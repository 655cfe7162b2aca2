//! Time sources for the countdown engine

use chrono::Utc;
use tokio::time::Instant;

/// Source of "now" for the countdown, in milliseconds from a clock-specific origin
pub trait Clock: Send + Sync + 'static {
    fn now_millis(&self) -> i64;
}

/// System wall clock. Time spent while the machine is suspended counts as
/// elapsed, so an overrun is detected on the first tick after resume.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl Clock for WallClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Monotonic clock backed by tokio's `Instant`, which follows a paused test runtime
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}
