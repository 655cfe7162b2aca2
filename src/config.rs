//! Configuration and CLI argument handling

use std::{sync::Arc, time::Duration};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::timer::{Clock, MonotonicClock, WallClock};

/// Shortest sleep timer accepted from users, in minutes
pub const MIN_MINUTES: i64 = 1;
/// Longest sleep timer accepted from users, in minutes
pub const MAX_MINUTES: i64 = 999;

/// Shown when a custom duration is rejected
pub const INVALID_DURATION_MESSAGE: &str = "Please enter a valid time (1-999 minutes)";

/// A quick-pick sleep timer duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub minutes: u32,
}

/// Quick options offered next to the custom duration input
pub const PRESETS: [Preset; 5] = [
    Preset { label: "15 min", minutes: 15 },
    Preset { label: "30 min", minutes: 30 },
    Preset { label: "45 min", minutes: 45 },
    Preset { label: "1 hour", minutes: 60 },
    Preset { label: "2 hours", minutes: 120 },
];

/// Check a user-supplied duration against the supported range
pub fn validate_minutes(minutes: i64) -> Result<u32, String> {
    if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
        return Err(INVALID_DURATION_MESSAGE.to_string());
    }
    u32::try_from(minutes).map_err(|_| INVALID_DURATION_MESSAGE.to_string())
}

/// Parse and validate a textual duration such as `"30"`
pub fn parse_minutes(input: &str) -> Result<u32, String> {
    let minutes = input
        .trim()
        .parse::<i64>()
        .map_err(|_| INVALID_DURATION_MESSAGE.to_string())?;
    validate_minutes(minutes)
}

/// Which time source the countdown uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockKind {
    /// System wall clock; suspend time counts towards the countdown
    Wall,
    /// Monotonic clock; suspend time is not counted on most platforms
    Monotonic,
}

impl ClockKind {
    pub fn build(self) -> Arc<dyn Clock> {
        match self {
            ClockKind::Wall => Arc::new(WallClock),
            ClockKind::Monotonic => Arc::new(MonotonicClock::new()),
        }
    }
}

/// Countdown engine tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    /// Delay between ticks; bounds expiry precision
    pub tick_interval: Duration,
    /// Minimum delay between display refreshes
    pub display_interval: Duration,
    /// Remaining time at which the one-time warning fires
    pub warning_threshold_secs: u64,
}

impl TimerSettings {
    pub fn display_interval_ms(&self) -> i64 {
        i64::try_from(self.display_interval.as_millis()).unwrap_or(i64::MAX)
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            display_interval: Duration::from_millis(1000),
            warning_threshold_secs: 60,
        }
    }
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "media-sleep-timer")]
#[command(about = "A sleep timer server that pauses media playback after a configurable duration")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// playerctl player to control (defaults to the first available player)
    #[arg(long)]
    pub player: Option<String>,

    /// Countdown tick interval in milliseconds
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub tick_ms: u64,

    /// Display refresh interval in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(100..=60000))]
    pub display_ms: u64,

    /// Seconds before expiry at which the warning is shown
    #[arg(long, default_value = "60")]
    pub warning_secs: u64,

    /// Time source for the countdown
    #[arg(long, value_enum, default_value = "wall")]
    pub clock: ClockKind,

    /// Start a sleep timer of this many minutes at startup
    #[arg(short, long, value_parser = parse_minutes)]
    pub start: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            tick_interval: Duration::from_millis(self.tick_ms),
            display_interval: Duration::from_millis(self.display_ms),
            warning_threshold_secs: self.warning_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_bounds_are_inclusive() {
        assert_eq!(validate_minutes(1), Ok(1));
        assert_eq!(validate_minutes(999), Ok(999));
        assert!(validate_minutes(0).is_err());
        assert!(validate_minutes(-5).is_err());
        assert!(validate_minutes(1000).is_err());
    }

    #[test]
    fn textual_durations_must_be_integers() {
        assert_eq!(parse_minutes(" 45 "), Ok(45));
        assert_eq!(parse_minutes("abc"), Err(INVALID_DURATION_MESSAGE.to_string()));
        assert!(parse_minutes("12.5").is_err());
        assert!(parse_minutes("").is_err());
    }

    #[test]
    fn presets_are_within_range() {
        let minutes: Vec<u32> = PRESETS.iter().map(|p| p.minutes).collect();
        assert_eq!(minutes, vec![15, 30, 45, 60, 120]);
        for preset in PRESETS {
            assert!(validate_minutes(i64::from(preset.minutes)).is_ok());
        }
    }

    #[test]
    fn cli_defaults_match_engine_defaults() {
        let config = Config::try_parse_from(["media-sleep-timer"]).expect("defaults parse");
        assert_eq!(config.timer_settings(), TimerSettings::default());
        assert_eq!(config.clock, ClockKind::Wall);
        assert_eq!(config.start, None);
        assert_eq!(config.address(), "0.0.0.0:20554");
    }

    #[test]
    fn cli_rejects_out_of_range_start() {
        assert!(Config::try_parse_from(["media-sleep-timer", "--start", "0"]).is_err());
        let config = Config::try_parse_from(["media-sleep-timer", "-s", "30", "--clock", "monotonic"])
            .expect("valid flags parse");
        assert_eq!(config.start, Some(30));
        assert_eq!(config.clock, ClockKind::Monotonic);
    }
}
