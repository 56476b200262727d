//! Board validation errors.

use derive_more::{Display, Error};

/// A requested board size or difficulty that cannot produce a valid deck.
///
/// Surfaced to whoever asked for the board (the level menu, the custom
/// level form). Never corrected silently.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Rows or columns outside the allowed range.
    #[display("board dimensions {rows}x{columns} out of range (each side must be {min}..={max})")]
    DimensionsOutOfRange {
        rows: u8,
        columns: u8,
        min: u8,
        max: u8,
    },

    /// Total card count outside the allowed range.
    #[display("board of {total} cards out of range (must be {min}..={max})")]
    TotalOutOfRange { total: u8, min: u8, max: u8 },

    /// No special-card quota in range leaves an even regular count of at least 4.
    #[display("no special-card quota fits a board of {total} cards")]
    QuotaUnavailable { total: u8 },

    /// The regular cards cannot be split into at least two pairs.
    #[display("{total} cards with {quota} special leaves {regular} regular cards (need an even count of at least 4)")]
    UnbalancedDeck { total: u8, quota: u8, regular: u8 },

    /// More pairs requested than distinct faces exist.
    #[display("{pairs} pairs requested but only {pool} distinct faces are available")]
    FacePoolExhausted { pairs: u8, pool: u8 },
}

impl BoardError {
    /// True when the failure is about size bounds rather than parity or
    /// the minimum number of pairs.
    #[must_use]
    pub fn is_size_violation(&self) -> bool {
        matches!(
            self,
            BoardError::DimensionsOutOfRange { .. } | BoardError::TotalOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = BoardError::UnbalancedDeck { total: 5, quota: 0, regular: 5 };
        assert_eq!(
            err.to_string(),
            "5 cards with 0 special leaves 5 regular cards (need an even count of at least 4)"
        );

        let err = BoardError::TotalOutOfRange { total: 3, min: 4, max: 25 };
        assert_eq!(err.to_string(), "board of 3 cards out of range (must be 4..=25)");
    }

    #[test]
    fn test_size_violation_classification() {
        assert!(BoardError::DimensionsOutOfRange { rows: 6, columns: 2, min: 1, max: 5 }.is_size_violation());
        assert!(BoardError::TotalOutOfRange { total: 2, min: 4, max: 25 }.is_size_violation());
        assert!(!BoardError::UnbalancedDeck { total: 5, quota: 0, regular: 5 }.is_size_violation());
        assert!(!BoardError::QuotaUnavailable { total: 7 }.is_size_violation());
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&BoardError::QuotaUnavailable { total: 7 });
    }
}
