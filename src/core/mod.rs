//! Core engine types: RNG and configuration.

pub mod config;
pub mod rng;

pub use config::{PendingOnPause, SessionConfig, SessionSetup, StrandedPartner};
pub use rng::GameRng;
