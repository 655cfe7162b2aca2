//! Collaborators the countdown engine talks to
//!
//! The engine pushes text to a [`DisplaySurface`], user-facing messages to a
//! [`Notifier`], and pauses playback through a [`VideoAction`]. Display and
//! notifier calls are made while the engine holds its session lock, so
//! implementations must not call back into the engine.

pub mod display;
pub mod notifier;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub use display::StatusDisplay;
pub use notifier::StateNotifier;

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One notification as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: DateTime<Utc>,
}

/// Fire-and-forget user messages; failure to display is never escalated
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, level: NotificationLevel);
}

/// Badge and banner rendering. All calls are idempotent.
pub trait DisplaySurface: Send + Sync {
    /// Compact remaining time, e.g. `15m`
    fn update_badge(&self, compact_text: &str);
    /// Full remaining time, e.g. `14:59`
    fn update_banner(&self, full_text: &str, urgent: bool);
    /// Back to the idle badge, banner removed
    fn remove(&self);
}

/// Action run once when the timer expires
pub trait VideoAction: Send + Sync {
    fn pause(&self) -> BoxFuture<'_, Result<(), String>>;
}

/// Loop playback flag of the media player
pub trait LoopControl: Send + Sync {
    fn loop_enabled(&self) -> BoxFuture<'_, Result<bool, String>>;
    fn set_loop(&self, enabled: bool) -> BoxFuture<'_, Result<(), String>>;
}
