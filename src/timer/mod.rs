//! Session timer.

mod session_timer;

pub use session_timer::{format_seconds, SessionTimer, TICK_INTERVAL};
