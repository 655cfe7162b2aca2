//! Per-session countdown bookkeeping

use chrono::{DateTime, Duration as ChronoDuration, Utc};

/// State of one sleep timer countdown, from `start` until reset or expiry
#[derive(Debug, Clone, Default)]
pub struct TimerSession {
    /// Clock reading captured at start
    pub started_at: Option<i64>,
    /// Wall-clock start, reported to clients
    pub started_at_utc: Option<DateTime<Utc>>,
    pub total_duration_ms: i64,
    /// Rounded up; never increases within a session
    pub remaining_seconds: u64,
    pub warning_fired: bool,
    /// A tick is scheduled
    pub active: bool,
    /// Clock reading of the last display push
    pub last_displayed_at: Option<i64>,
}

impl TimerSession {
    /// Begin a session of `minutes` at clock reading `now`
    pub fn begin(now: i64, minutes: u32, started_at_utc: DateTime<Utc>) -> Self {
        let total_duration_ms = i64::from(minutes) * 60_000;
        Self {
            started_at: Some(now),
            started_at_utc: Some(started_at_utc),
            total_duration_ms,
            remaining_seconds: u64::from(minutes) * 60,
            warning_fired: false,
            active: true,
            last_displayed_at: None,
        }
    }

    /// Recompute the remaining time from the elapsed clock delta.
    ///
    /// Returns the remaining milliseconds; zero means the session has expired.
    pub fn recompute(&mut self, now: i64) -> i64 {
        let Some(started_at) = self.started_at else {
            return 0;
        };

        let elapsed = now.saturating_sub(started_at).max(0);
        let remaining_ms = self.total_duration_ms.saturating_sub(elapsed).max(0);
        let remaining_seconds = u64::try_from(remaining_ms).unwrap_or(0).div_ceil(1000);

        self.remaining_seconds = self.remaining_seconds.min(remaining_seconds);
        remaining_ms
    }

    /// Whether the displays are due for a refresh at `now`
    pub fn display_due(&self, now: i64, interval_ms: i64) -> bool {
        match self.last_displayed_at {
            Some(last) => now.saturating_sub(last) >= interval_ms,
            None => true,
        }
    }

    /// Whether the near-expiry warning should fire now
    pub fn warning_due(&self, threshold_secs: u64) -> bool {
        !self.warning_fired && self.remaining_seconds > 0 && self.remaining_seconds <= threshold_secs
    }

    pub fn total_minutes(&self) -> u64 {
        u64::try_from(self.total_duration_ms / 60_000).unwrap_or(0)
    }

    /// Expected wall-clock end of the session
    pub fn ends_at_utc(&self) -> Option<DateTime<Utc>> {
        self.started_at_utc
            .map(|start| start + ChronoDuration::milliseconds(self.total_duration_ms))
    }
}
