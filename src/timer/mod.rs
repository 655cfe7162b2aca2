//! Sleep timer module
//!
//! The countdown engine, its per-session state, time sources and the
//! remaining-time formatting shared by the badge and banner.

pub mod clock;
pub mod countdown;
pub mod format;
pub mod session;

// Re-export main types
pub use clock::{Clock, MonotonicClock, WallClock};
pub use countdown::CountdownTimer;
pub use format::{format_compact, format_remaining, UNDER_ONE_MINUTE};
pub use session::TimerSession;
