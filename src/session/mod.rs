//! Session engine: turn state machine, deferred resolution, scoring and
//! notifications.
//!
//! ## Key Types
//!
//! - `Session`: Owns board, timer and scheduler for one playthrough
//! - `Resolution` / `Scheduler`: The single pending continuation
//! - `SessionEvent` / `SessionObserver`: Notifications to the presentation layer
//! - `StarRating` / `SessionSummary`: Scoring

mod engine;
pub mod events;
pub mod scheduler;
pub mod scoring;

pub use engine::{Activation, IgnoreReason, PairKind, Session, SessionStatus, TurnPhase};
pub use events::{SessionEvent, SessionObserver};
pub use scheduler::{Resolution, Scheduler};
pub use scoring::{move_efficiency, SessionSummary, StarRating};
