//! Deck generation and the in-play card layout.
//!
//! `Board` owns the card sequence for one session. It is built by
//! `Board::generate` from a size, theme and difficulty, and rescrambled
//! mid-game by `Board::reshuffle`.

mod deck;

pub use deck::Board;
