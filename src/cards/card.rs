//! Card entity: identity plus the two visibility flags.
//!
//! A card has two identifiers:
//! - `CardId`: unique per board, used by the presentation layer to say
//!   which card was activated.
//! - `PairId`: the pairing key. Two regular cards with the same `PairId`
//!   are a matching pair. Special cards carry `PairId::SENTINEL`.

use serde::{Deserialize, Serialize};

/// Unique handle of a card within one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card handle.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Pairing key. Also selects the face asset within a theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairId(pub u32);

impl PairId {
    /// Pair id carried by special cards. Never used for pairing.
    pub const SENTINEL: PairId = PairId(0);

    /// Create a new pair id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Behavioral variant of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Participates in pairing by `PairId`.
    Regular,
    /// Single use. Paired with a regular card, reveals and resolves its partner.
    Hint,
    /// Single use. Once resolved, rescrambles the remaining cards.
    Shuffle,
}

impl CardKind {
    /// Hint or Shuffle.
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, CardKind::Regular)
    }
}

/// A card on the board.
///
/// Identity (`id`, `pair`, `kind`) is fixed at creation. Only the session
/// flips `revealed` and `resolved`; once resolved a card never changes again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    pair: PairId,
    kind: CardKind,
    revealed: bool,
    resolved: bool,
}

impl Card {
    /// Create a face-down regular card.
    #[must_use]
    pub fn regular(id: CardId, pair: PairId) -> Self {
        Self {
            id,
            pair,
            kind: CardKind::Regular,
            revealed: false,
            resolved: false,
        }
    }

    /// Create a face-down special card.
    ///
    /// # Panics
    /// If `kind` is `CardKind::Regular`.
    #[must_use]
    pub fn special(id: CardId, kind: CardKind) -> Self {
        assert!(kind.is_special(), "special card must be Hint or Shuffle");
        Self {
            id,
            pair: PairId::SENTINEL,
            kind,
            revealed: false,
            resolved: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn pair(&self) -> PairId {
        self.pair
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// Currently face-up.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Removed from play.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Still on the board and face-down.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.revealed && !self.resolved
    }

    /// Regular card sharing this card's pair id (and not this card).
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.kind == CardKind::Regular
            && other.kind == CardKind::Regular
            && self.id != other.id
            && self.pair == other.pair
    }

    /// Set the face-up flag. Returns false if the card is already resolved.
    pub(crate) fn set_revealed(&mut self, revealed: bool) -> bool {
        if self.resolved {
            return false;
        }
        self.revealed = revealed;
        true
    }

    /// Remove the card from play.
    pub(crate) fn resolve(&mut self) {
        self.resolved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Card(7)");
    }

    #[test]
    fn test_regular_card_starts_hidden() {
        let card = Card::regular(CardId::new(0), PairId::new(3));
        assert_eq!(card.kind(), CardKind::Regular);
        assert_eq!(card.pair(), PairId::new(3));
        assert!(!card.is_revealed());
        assert!(!card.is_resolved());
        assert!(card.is_selectable());
    }

    #[test]
    fn test_special_card_uses_sentinel() {
        let hint = Card::special(CardId::new(1), CardKind::Hint);
        assert_eq!(hint.pair(), PairId::SENTINEL);
        assert!(hint.kind().is_special());
    }

    #[test]
    #[should_panic(expected = "special card must be Hint or Shuffle")]
    fn test_special_rejects_regular_kind() {
        let _ = Card::special(CardId::new(1), CardKind::Regular);
    }

    #[test]
    fn test_pairs_with() {
        let a = Card::regular(CardId::new(0), PairId::new(4));
        let b = Card::regular(CardId::new(1), PairId::new(4));
        let c = Card::regular(CardId::new(2), PairId::new(5));
        let hint = Card::special(CardId::new(3), CardKind::Hint);
        let shuffle = Card::special(CardId::new(4), CardKind::Shuffle);

        assert!(a.pairs_with(&b));
        assert!(!a.pairs_with(&a));
        assert!(!a.pairs_with(&c));
        // Two special cards share the sentinel but never pair
        assert!(!hint.pairs_with(&shuffle));
    }

    #[test]
    fn test_resolved_card_is_frozen() {
        let mut card = Card::regular(CardId::new(0), PairId::new(1));
        assert!(card.set_revealed(true));
        card.resolve();

        assert!(!card.set_revealed(false));
        assert!(card.is_revealed());
        assert!(!card.is_selectable());
    }
}
