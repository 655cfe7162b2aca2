//! External service management module
//!
//! This module contains the media player adapter and checks for the host
//! tools it relies on.

pub mod player;
pub mod system;

// Re-export main types and functions
pub use player::PlayerctlPlayer;
pub use system::check_playerctl_available;
