//! # rust-pairs
//!
//! A session engine for the memory (pair-matching) card game.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine speaks in card handles, pair ids
//!    and kinds. Rendering, assets and dialogs live outside.
//!
//! 2. **Deterministic**: Dealing and reshuffling use a seedable RNG; time is
//!    a logical clock driven by the caller via `Session::advance`.
//!
//! 3. **One Owner**: A `Session` exclusively owns its board, timer and
//!    pending resolution. No global state.
//!
//! ## Modules
//!
//! - `core`: RNG and configuration
//! - `cards`: Card identity, kinds and themes
//! - `difficulty`: Board shapes, special-card quotas, custom validation
//! - `board`: Deck generation and reshuffling
//! - `timer`: Elapsed-seconds timer
//! - `session`: Turn state machine, scheduler, scoring and events

pub mod core;
pub mod error;
pub mod cards;
pub mod difficulty;
pub mod board;
pub mod timer;
pub mod session;

// Re-export commonly used types
pub use crate::core::{GameRng, PendingOnPause, SessionConfig, SessionSetup, StrandedPartner};

pub use crate::error::BoardError;

pub use crate::cards::{Card, CardId, CardKind, PairId, Theme};

pub use crate::difficulty::{Difficulty, Dimensions, LevelOutline};

pub use crate::board::Board;

pub use crate::timer::SessionTimer;

pub use crate::session::{
    Activation, IgnoreReason, PairKind, Resolution, Session, SessionEvent, SessionObserver,
    SessionStatus, SessionSummary, StarRating, TurnPhase,
};
