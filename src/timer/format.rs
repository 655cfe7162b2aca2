//! Remaining-time formatting for the badge and the countdown banner

/// Shown on the badge while time remains but less than a whole minute
pub const UNDER_ONE_MINUTE: &str = "<1m";

/// Format seconds as `H:MM:SS`, dropping the hour field when it is zero (`M:SS`)
pub fn format_remaining(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Compact badge text: whole minutes rounded up, or [`UNDER_ONE_MINUTE`]
pub fn format_compact(seconds: u64) -> String {
    match seconds {
        0 => String::new(),
        1..=59 => UNDER_ONE_MINUTE.to_string(),
        _ => format!("{}m", seconds.div_ceil(60)),
    }
}
