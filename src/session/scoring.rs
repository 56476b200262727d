//! Star rating and end-of-session summary.
//!
//! ## Stars
//!
//! Move efficiency is `moves / (cards * 2)`:
//!
//! | Efficiency    | Stars |
//! |---------------|-------|
//! | > 1.00        | 0     |
//! | > 0.85        | 1     |
//! | > 0.70        | 2     |
//! | otherwise     | 3     |
//!
//! ## Summary
//!
//! The summary adds a weighted efficiency percentage: 60% from moves per
//! pair against an ideal of 1.2, 40% from seconds per card against an
//! ideal of 4.0, each component floored at zero.

use serde::{Deserialize, Serialize};

use crate::timer::format_seconds;

/// Star rating, 0 to 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StarRating(u8);

impl StarRating {
    pub const MAX: StarRating = StarRating(3);

    /// # Panics
    /// If `stars` is above 3.
    #[must_use]
    pub fn new(stars: u8) -> Self {
        assert!(stars <= Self::MAX.0, "star rating {stars} above 3");
        Self(stars)
    }

    /// Rating for a move efficiency.
    #[must_use]
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency > 1.0 {
            Self(0)
        } else if efficiency > 0.85 {
            Self(1)
        } else if efficiency > 0.70 {
            Self(2)
        } else {
            Self(3)
        }
    }

    /// Rating after `moves` moves on a board of `total_cards` cards.
    #[must_use]
    pub fn for_moves(moves: u32, total_cards: usize) -> Self {
        Self::from_efficiency(move_efficiency(moves, total_cards))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// One-line verdict shown next to the stars.
    #[must_use]
    pub fn verdict(self) -> &'static str {
        match self.0 {
            0 => "Try again!",
            1 => "Not bad, but you can do better!",
            2 => "Good result!",
            _ => "Excellent! A perfect game!",
        }
    }
}

impl Default for StarRating {
    fn default() -> Self {
        Self::MAX
    }
}

impl std::fmt::Display for StarRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of 3 stars", self.0)
    }
}

/// `moves` over the move budget of twice the card count.
#[must_use]
pub fn move_efficiency(moves: u32, total_cards: usize) -> f64 {
    if total_cards == 0 {
        return 0.0;
    }
    f64::from(moves) / (total_cards as f64 * 2.0)
}

const IDEAL_MOVES_PER_PAIR: f64 = 1.2;
const IDEAL_SECONDS_PER_CARD: f64 = 4.0;

/// End-of-session statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub moves: u32,
    pub elapsed_seconds: u32,
    pub formatted_time: String,
    pub stars: StarRating,
    pub total_cards: usize,
    /// Half the card count, special cards included.
    pub pairs: usize,
    pub moves_per_pair: f64,
    pub seconds_per_card: f64,
    /// Weighted score in percent.
    pub efficiency_percent: f64,
}

impl SessionSummary {
    #[must_use]
    pub fn new(moves: u32, elapsed_seconds: u32, stars: StarRating, total_cards: usize) -> Self {
        let pairs = total_cards / 2;
        let moves_per_pair = if pairs > 0 {
            f64::from(moves) / pairs as f64
        } else {
            f64::from(moves)
        };
        let seconds_per_card = if total_cards > 0 {
            f64::from(elapsed_seconds) / total_cards as f64
        } else {
            0.0
        };
        let efficiency_percent = if pairs == 0 {
            0.0
        } else {
            let by_moves = (100.0 - (moves_per_pair - IDEAL_MOVES_PER_PAIR) * 25.0).max(0.0);
            let by_time = (100.0 - (seconds_per_card - IDEAL_SECONDS_PER_CARD) * 10.0).max(0.0);
            by_moves * 0.6 + by_time * 0.4
        };

        Self {
            moves,
            elapsed_seconds,
            formatted_time: format_seconds(elapsed_seconds),
            stars,
            total_cards,
            pairs,
            moves_per_pair,
            seconds_per_card,
            efficiency_percent,
        }
    }
}
