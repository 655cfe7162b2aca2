//! Media Sleep Timer - an HTTP server that pauses media playback on a timer
//!
//! This library provides the sleep timer countdown engine, the display and
//! notification surfaces it drives, and loop playback control through
//! playerctl.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod surfaces;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use timer::CountdownTimer;
pub use utils::signals::shutdown_signal;
