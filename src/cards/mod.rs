//! Card system: identities, kinds and themes.
//!
//! ## Key Types
//!
//! - `CardId`: Unique handle of one card on a board
//! - `PairId`: Pairing key shared by the two cards of a pair
//! - `CardKind`: Regular, Hint or Shuffle
//! - `Card`: Identity plus the revealed/resolved flags
//! - `Theme`: Opaque face-set token

pub mod card;
pub mod theme;

pub use card::{Card, CardId, CardKind, PairId};
pub use theme::Theme;
