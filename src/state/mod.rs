//! State management module
//!
//! This module contains the shared application state and the snapshots it reports.

pub mod app_state;
pub mod display_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use display_state::{Banner, DisplayState};
pub use timer_state::TimerState;
