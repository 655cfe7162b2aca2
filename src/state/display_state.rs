//! What the sleep timer badge and countdown banner currently show

use serde::{Deserialize, Serialize};

/// Badge content while no timer is running
pub const IDLE_BADGE: &str = "😴";
/// Prefix of the badge and banner while a timer is running
pub const TIMER_ICON: &str = "⏰";

/// Countdown banner shown while a timer runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    /// Set once the warning threshold is reached
    pub urgent: bool,
}

/// Display surface contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub badge: String,
    pub banner: Option<Banner>,
}

impl DisplayState {
    /// Idle badge, no banner
    pub fn idle() -> Self {
        Self {
            badge: IDLE_BADGE.to_string(),
            banner: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.badge == IDLE_BADGE && self.banner.is_none()
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::idle()
    }
}
