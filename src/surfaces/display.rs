//! Display surface backed by a watch channel

use tokio::sync::watch;
use tracing::debug;

use super::DisplaySurface;
use crate::state::{display_state::TIMER_ICON, Banner, DisplayState};

/// Holds the current badge/banner and publishes every change to subscribers
#[derive(Debug)]
pub struct StatusDisplay {
    state_tx: watch::Sender<DisplayState>,
}

impl StatusDisplay {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(DisplayState::idle());
        Self { state_tx }
    }

    /// Current contents
    pub fn current(&self) -> DisplayState {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on each change; feeds `GET /display/stream`
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state_tx.subscribe()
    }
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for StatusDisplay {
    fn update_badge(&self, compact_text: &str) {
        let badge = format!("{}{}", TIMER_ICON, compact_text);
        self.state_tx.send_if_modified(|state| {
            if state.badge == badge {
                return false;
            }
            state.badge = badge;
            true
        });
    }

    fn update_banner(&self, full_text: &str, urgent: bool) {
        let banner = Banner {
            text: format!("{} Sleep Timer: {}", TIMER_ICON, full_text),
            urgent,
        };
        self.state_tx.send_if_modified(|state| {
            if state.banner.as_ref() == Some(&banner) {
                return false;
            }
            state.banner = Some(banner);
            true
        });
    }

    fn remove(&self) {
        let removed = self.state_tx.send_if_modified(|state| {
            if state.is_idle() {
                return false;
            }
            *state = DisplayState::idle();
            true
        });
        if removed {
            debug!("Sleep timer display removed");
        }
    }
}
