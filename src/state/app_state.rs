//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::{DisplayState, TimerState};
use crate::{
    config::{validate_minutes, Preset, TimerSettings, INVALID_DURATION_MESSAGE, PRESETS},
    surfaces::{
        LoopControl, Notification, NotificationLevel, Notifier, StateNotifier, StatusDisplay,
        VideoAction,
    },
    timer::{Clock, CountdownTimer},
};

/// Main application state: the sleep timer, the player and what the user sees
pub struct AppState {
    /// Sleep timer countdown engine
    pub timer: CountdownTimer,
    /// Badge and banner contents
    pub display: Arc<StatusDisplay>,
    /// User notifications
    pub notifier: Arc<StateNotifier>,
    /// Player loop flag
    pub loop_control: Arc<dyn LoopControl>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around `player`, which both pauses on expiry and owns the loop flag
    pub fn new<P>(
        port: u16,
        host: String,
        settings: TimerSettings,
        clock: Arc<dyn Clock>,
        player: Arc<P>,
    ) -> Self
    where
        P: VideoAction + LoopControl + 'static,
    {
        let display = Arc::new(StatusDisplay::new());
        let notifier = Arc::new(StateNotifier::default());
        let action: Arc<dyn VideoAction> = player.clone();
        let timer = CountdownTimer::new(settings, clock, notifier.clone(), display.clone(), action);

        Self {
            timer,
            display,
            notifier,
            loop_control: player,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Record the latest user action
    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start the sleep timer for a validated duration
    pub fn start_timer(&self, minutes: u32) -> TimerState {
        self.timer.start(minutes);
        self.record_action(&format!("timer-{}m", minutes));
        self.timer.snapshot()
    }

    /// Validate a user-entered duration, then start the timer.
    ///
    /// Invalid input is reported to the user and leaves any running timer alone.
    pub fn start_custom_timer(&self, minutes: i64) -> Result<TimerState, String> {
        match validate_minutes(minutes) {
            Ok(minutes) => Ok(self.start_timer(minutes)),
            Err(_) => Err(self.reject_duration(&minutes.to_string())),
        }
    }

    /// Tell the user a duration was not accepted; returns the message shown
    pub fn reject_duration(&self, raw: &str) -> String {
        warn!("Rejected sleep timer duration: {}", raw);
        self.notifier.show(INVALID_DURATION_MESSAGE, NotificationLevel::Error);
        INVALID_DURATION_MESSAGE.to_string()
    }

    /// Start one of the quick-pick presets by position
    pub fn start_preset(&self, index: usize) -> Result<(Preset, TimerState), String> {
        let preset = PRESETS
            .get(index)
            .copied()
            .ok_or_else(|| format!("Unknown sleep timer preset: {}", index))?;
        info!("Starting sleep timer preset {}", preset.label);
        Ok((preset, self.start_timer(preset.minutes)))
    }

    /// Cancel the sleep timer. Returns whether one was running.
    pub fn cancel_timer(&self) -> bool {
        self.record_action("timer-cancel");
        self.timer.cancel()
    }

    /// Flip the player's loop flag and return the new value
    pub async fn toggle_loop(&self) -> Result<bool, String> {
        self.record_action("loop-toggle");

        let result = async {
            let enabled = !self.loop_control.loop_enabled().await?;
            self.loop_control.set_loop(enabled).await?;
            Ok::<bool, String>(enabled)
        }
        .await;

        match result {
            Ok(true) => self.notifier.show("Loop enabled", NotificationLevel::Success),
            Ok(false) => self.notifier.show("Loop disabled", NotificationLevel::Info),
            Err(ref e) => {
                error!("Failed to toggle loop: {}", e);
                self.notifier.show("Loop toggle not available", NotificationLevel::Error);
            }
        }
        result
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> TimerState {
        self.timer.snapshot()
    }

    /// Get current badge and banner
    pub fn get_display_state(&self) -> DisplayState {
        self.display.current()
    }

    /// Notifications still in the history
    pub fn get_notifications(&self) -> Vec<Notification> {
        self.notifier.recent()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Tear down the sleep timer before the process exits
    pub fn shutdown(&self) {
        if self.timer.is_active() {
            info!("Clearing running sleep timer on shutdown");
        }
        self.timer.reset();
    }
}
