//! Timer state snapshot reported to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of the sleep timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub active: bool,
    pub remaining_seconds: Option<u64>,
    /// `H:MM:SS` or `M:SS`, empty while inactive
    pub remaining: String,
    /// Badge form, e.g. `15m` or `<1m`
    pub remaining_compact: String,
    pub total_minutes: Option<u64>,
    pub started_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub warning_fired: bool,
}

impl TimerState {
    /// Create an inactive timer state
    pub fn inactive() -> Self {
        Self {
            active: false,
            remaining_seconds: None,
            remaining: String::new(),
            remaining_compact: String::new(),
            total_minutes: None,
            started_at: None,
            ends_at: None,
            warning_fired: false,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::inactive()
    }
}
