//! Difficulty policy: labels and custom sizes to board shape and special cards.
//!
//! Pure functions, no state. Consulted once when a session starts.
//!
//! ## Quotas
//!
//! | Difficulty | Board | Specials             |
//! |------------|-------|----------------------|
//! | Easy       | 2x2   | none                 |
//! | Medium     | 3x3   | Hint                 |
//! | Hard       | 4x4   | Hint, Shuffle        |
//! | Expert     | 5x5   | Hint, Hint, Shuffle  |
//!
//! Custom boards derive the quota from the card count (see
//! [`special_card_quota`]).

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::error::BoardError;

/// Smallest allowed row or column count.
pub const MIN_SIDE: u8 = 1;
/// Largest allowed row or column count.
pub const MAX_SIDE: u8 = 5;
/// Smallest allowed board.
pub const MIN_CARDS: u8 = 4;
/// Largest allowed board.
pub const MAX_CARDS: u8 = 25;
/// At least two pairs of regular cards.
pub const MIN_REGULAR: u8 = 4;
/// Number of distinct regular faces per theme.
pub const FACE_POOL_SIZE: u8 = 11;
/// Every face used twice.
pub const MAX_REGULAR: u8 = FACE_POOL_SIZE * 2;
/// Upper bound on Hint + Shuffle cards.
pub const MAX_QUOTA: u8 = 3;

/// Named difficulty level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
    /// Player-chosen rows and columns.
    Custom,
}

impl Difficulty {
    /// The four preset levels, easiest first.
    pub const PRESETS: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Parse a level label, case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            "custom" => Some(Difficulty::Custom),
            _ => None,
        }
    }

    /// Board shape of a preset. `Custom` has no fixed shape.
    #[must_use]
    pub const fn preset_dimensions(self) -> Option<Dimensions> {
        match self {
            Difficulty::Easy => Some(Dimensions::new(2, 2)),
            Difficulty::Medium => Some(Dimensions::new(3, 3)),
            Difficulty::Hard => Some(Dimensions::new(4, 4)),
            Difficulty::Expert => Some(Dimensions::new(5, 5)),
            Difficulty::Custom => None,
        }
    }

    /// Fixed special-card quota of a preset.
    #[must_use]
    pub const fn preset_quota(self) -> Option<u8> {
        match self {
            Difficulty::Easy => Some(0),
            Difficulty::Medium => Some(1),
            Difficulty::Hard => Some(2),
            Difficulty::Expert => Some(3),
            Difficulty::Custom => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
            Difficulty::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Rows and columns of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: u8,
    pub columns: u8,
}

impl Dimensions {
    #[must_use]
    pub const fn new(rows: u8, columns: u8) -> Self {
        Self { rows, columns }
    }

    /// Number of cards on the board.
    #[must_use]
    pub const fn total(self) -> u8 {
        self.rows * self.columns
    }

    /// Check side and total bounds.
    pub fn check_bounds(self) -> Result<(), BoardError> {
        let side_ok = |side: u8| (MIN_SIDE..=MAX_SIDE).contains(&side);
        if !side_ok(self.rows) || !side_ok(self.columns) {
            return Err(BoardError::DimensionsOutOfRange {
                rows: self.rows,
                columns: self.columns,
                min: MIN_SIDE,
                max: MAX_SIDE,
            });
        }
        let total = self.total();
        if !(MIN_CARDS..=MAX_CARDS).contains(&total) {
            return Err(BoardError::TotalOutOfRange {
                total,
                min: MIN_CARDS,
                max: MAX_CARDS,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Board shape for a level label. Unrecognized labels get the 2x2 board.
#[must_use]
pub fn dimensions(label: &str) -> Dimensions {
    Difficulty::from_label(label)
        .and_then(Difficulty::preset_dimensions)
        .unwrap_or(Dimensions::new(2, 2))
}

/// Number of special cards for a board of `total` cards.
///
/// Presets use their fixed quota. Custom boards start from a step
/// function of the card count (up to 9 → 1, up to 16 → 1, under 25 → 2,
/// 25 → 3) and step down until the regular remainder is even and within
/// `MIN_REGULAR..=MAX_REGULAR`.
pub fn special_card_quota(total: u8, difficulty: Difficulty) -> Result<u8, BoardError> {
    if let Some(quota) = difficulty.preset_quota() {
        return Ok(quota);
    }
    if !(MIN_CARDS..=MAX_CARDS).contains(&total) {
        return Err(BoardError::TotalOutOfRange {
            total,
            min: MIN_CARDS,
            max: MAX_CARDS,
        });
    }

    let ceiling = match total {
        0..=9 => 1,
        10..=16 => 1,
        17..=24 => 2,
        _ => 3,
    }
    .min(MAX_QUOTA);

    (0..=ceiling)
        .rev()
        .find(|&quota| regular_count_is_valid(total - quota))
        .ok_or(BoardError::QuotaUnavailable { total })
}

/// Even, at least two pairs, and no more pairs than faces.
#[must_use]
pub fn regular_count_is_valid(regular: u8) -> bool {
    regular % 2 == 0 && (MIN_REGULAR..=MAX_REGULAR).contains(&regular)
}

/// Validate a custom board size.
pub fn validate_custom(rows: u8, columns: u8) -> Result<Dimensions, BoardError> {
    let dims = Dimensions::new(rows, columns);
    dims.check_bounds()?;
    let total = dims.total();
    let quota = special_card_quota(total, Difficulty::Custom)?;
    let regular = total - quota;
    if regular % 2 != 0 || regular < MIN_REGULAR {
        return Err(BoardError::UnbalancedDeck { total, quota, regular });
    }
    Ok(dims)
}

/// Boolean form of [`validate_custom`].
#[must_use]
pub fn is_valid_custom(rows: u8, columns: u8) -> bool {
    validate_custom(rows, columns).is_ok()
}

/// Which special cards make up a quota.
#[must_use]
pub fn special_composition(quota: u8) -> &'static [CardKind] {
    debug_assert!(quota <= MAX_QUOTA, "quota {quota} above {MAX_QUOTA}");
    match quota {
        0 => &[],
        1 => &[CardKind::Hint],
        2 => &[CardKind::Hint, CardKind::Shuffle],
        _ => &[CardKind::Hint, CardKind::Hint, CardKind::Shuffle],
    }
}

/// What a custom level will contain, for the confirmation prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOutline {
    pub dimensions: Dimensions,
    pub total_cards: u8,
    pub special_cards: u8,
    pub regular_pairs: u8,
    pub composition: Vec<CardKind>,
}

impl LevelOutline {
    /// Short description of the special cards, e.g. "1 hint + 1 shuffle".
    #[must_use]
    pub fn special_summary(&self) -> String {
        let hints = self.composition.iter().filter(|k| **k == CardKind::Hint).count();
        let shuffles = self.composition.iter().filter(|k| **k == CardKind::Shuffle).count();
        let mut parts = Vec::new();
        match hints {
            0 => {}
            1 => parts.push("1 hint".to_string()),
            n => parts.push(format!("{n} hints")),
        }
        match shuffles {
            0 => {}
            1 => parts.push("1 shuffle".to_string()),
            n => parts.push(format!("{n} shuffles")),
        }
        if parts.is_empty() {
            "no special cards".to_string()
        } else {
            parts.join(" + ")
        }
    }
}

impl std::fmt::Display for LevelOutline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} board, {} cards, {} regular pairs, {}",
            self.dimensions,
            self.total_cards,
            self.regular_pairs,
            self.special_summary()
        )
    }
}

/// Validate a custom size and describe the resulting level.
pub fn describe_custom(rows: u8, columns: u8) -> Result<LevelOutline, BoardError> {
    let dimensions = validate_custom(rows, columns)?;
    let total_cards = dimensions.total();
    let special_cards = special_card_quota(total_cards, Difficulty::Custom)?;
    Ok(LevelOutline {
        dimensions,
        total_cards,
        special_cards,
        regular_pairs: (total_cards - special_cards) / 2,
        composition: special_composition(special_cards).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_dimensions() {
        assert_eq!(dimensions("easy"), Dimensions::new(2, 2));
        assert_eq!(dimensions("Medium"), Dimensions::new(3, 3));
        assert_eq!(dimensions("HARD"), Dimensions::new(4, 4));
        assert_eq!(dimensions("expert"), Dimensions::new(5, 5));
    }

    #[test]
    fn test_unknown_label_defaults_to_two_by_two() {
        assert_eq!(dimensions("nightmare"), Dimensions::new(2, 2));
        assert_eq!(dimensions("custom"), Dimensions::new(2, 2));
        assert_eq!(dimensions(""), Dimensions::new(2, 2));
    }

    #[test]
    fn test_preset_quota_ignores_total() {
        assert_eq!(special_card_quota(4, Difficulty::Easy), Ok(0));
        assert_eq!(special_card_quota(9, Difficulty::Medium), Ok(1));
        assert_eq!(special_card_quota(16, Difficulty::Hard), Ok(2));
        assert_eq!(special_card_quota(25, Difficulty::Expert), Ok(3));
    }

    #[test]
    fn test_custom_quota_steps() {
        let custom = |total| special_card_quota(total, Difficulty::Custom).unwrap();
        assert_eq!(custom(4), 0);
        assert_eq!(custom(5), 1);
        assert_eq!(custom(6), 0);
        assert_eq!(custom(9), 1);
        assert_eq!(custom(12), 0);
        assert_eq!(custom(15), 1);
        assert_eq!(custom(20), 2);
        assert_eq!(custom(23), 1);
        assert_eq!(custom(24), 2);
        assert_eq!(custom(25), 3);
    }

    #[test]
    fn test_custom_quota_out_of_range() {
        assert_eq!(
            special_card_quota(3, Difficulty::Custom),
            Err(BoardError::TotalOutOfRange { total: 3, min: 4, max: 25 })
        );
        assert!(special_card_quota(26, Difficulty::Custom).is_err());
    }

    #[test]
    fn test_custom_quota_leaves_even_regulars() {
        for total in MIN_CARDS..=MAX_CARDS {
            let quota = special_card_quota(total, Difficulty::Custom).unwrap();
            assert!(quota <= MAX_QUOTA);
            assert!(regular_count_is_valid(total - quota), "total {total}");
        }
    }

    #[test]
    fn test_validate_custom() {
        assert_eq!(validate_custom(1, 4), Ok(Dimensions::new(1, 4)));
        assert_eq!(validate_custom(5, 5), Ok(Dimensions::new(5, 5)));
        assert!(is_valid_custom(2, 3));

        let err = validate_custom(1, 3).unwrap_err();
        assert!(err.is_size_violation());

        let err = validate_custom(6, 2).unwrap_err();
        assert!(matches!(err, BoardError::DimensionsOutOfRange { rows: 6, columns: 2, .. }));

        assert!(!is_valid_custom(0, 5));
    }

    #[test]
    fn test_special_composition() {
        assert!(special_composition(0).is_empty());
        assert_eq!(special_composition(1), &[CardKind::Hint]);
        assert_eq!(special_composition(2), &[CardKind::Hint, CardKind::Shuffle]);
        assert_eq!(
            special_composition(3),
            &[CardKind::Hint, CardKind::Hint, CardKind::Shuffle]
        );
    }

    #[test]
    fn test_describe_custom() {
        let outline = describe_custom(4, 5).unwrap();
        assert_eq!(outline.total_cards, 20);
        assert_eq!(outline.special_cards, 2);
        assert_eq!(outline.regular_pairs, 9);
        assert_eq!(outline.special_summary(), "1 hint + 1 shuffle");
        assert_eq!(
            outline.to_string(),
            "4x5 board, 20 cards, 9 regular pairs, 1 hint + 1 shuffle"
        );

        let outline = describe_custom(5, 5).unwrap();
        assert_eq!(outline.special_summary(), "2 hints + 1 shuffle");

        let outline = describe_custom(2, 2).unwrap();
        assert_eq!(outline.special_summary(), "no special cards");
    }

    #[test]
    fn test_difficulty_labels() {
        for level in Difficulty::PRESETS {
            assert_eq!(Difficulty::from_label(&level.to_string()), Some(level));
        }
        assert_eq!(Difficulty::from_label("Custom"), Some(Difficulty::Custom));
        assert_eq!(Difficulty::from_label("impossible"), None);
    }
}
