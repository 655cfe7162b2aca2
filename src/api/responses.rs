//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::Preset,
    state::{DisplayState, TimerState},
    surfaces::Notification,
};

/// Body of `POST /timer`; minutes may be a JSON number or a numeric string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartTimerRequest {
    pub minutes: serde_json::Value,
}

impl StartTimerRequest {
    /// Integer minutes, if the value is one; range checks happen later
    pub fn minutes(&self) -> Option<i64> {
        match &self.minutes {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// API response structure for timer endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create an active response
    pub fn active(message: String, timer: TimerState) -> Self {
        Self::new("active".to_string(), message, timer)
    }

    /// Create an inactive response
    pub fn inactive(message: String, timer: TimerState) -> Self {
        Self::new("inactive".to_string(), message, timer)
    }

    /// Create an error response
    pub fn error(message: String, timer: TimerState) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Response of `POST /loop`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub loop_enabled: Option<bool>,
}

impl LoopResponse {
    pub fn toggled(enabled: bool) -> Self {
        Self {
            status: if enabled { "active" } else { "inactive" }.to_string(),
            message: if enabled { "Loop enabled" } else { "Loop disabled" }.to_string(),
            timestamp: Utc::now(),
            loop_enabled: Some(enabled),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
            loop_enabled: None,
        }
    }
}

/// Response of `GET /timer/presets`
#[derive(Debug, Clone, Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<Preset>,
    pub min_minutes: i64,
    pub max_minutes: i64,
}

/// Status response with timer, display and notification information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub display: DisplayState,
    pub notifications: Vec<Notification>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
