//! Board: the dealt card sequence plus deck generation and reshuffling.
//!
//! ## Generation
//!
//! 1. Ask the difficulty policy for the special-card quota.
//! 2. Draw `regular / 2` distinct faces from the pool, two cards each.
//! 3. Add the special cards from the composition table.
//! 4. Fisher–Yates the whole sequence.
//!
//! ```
//! use rust_pairs::board::Board;
//! use rust_pairs::cards::Theme;
//! use rust_pairs::core::GameRng;
//! use rust_pairs::difficulty::Difficulty;
//!
//! let mut rng = GameRng::new(42);
//! let board = Board::generate(3, 3, Theme::Plants, Difficulty::Medium, &mut rng).unwrap();
//!
//! assert_eq!(board.len(), 9);
//! assert_eq!(board.special_count(), 1);
//! ```

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cards::{Card, CardId, CardKind, PairId, Theme};
use crate::core::GameRng;
use crate::difficulty::{
    special_card_quota, special_composition, Difficulty, Dimensions, FACE_POOL_SIZE, MIN_REGULAR,
};
use crate::error::BoardError;

/// A dealt board.
///
/// Owns its cards in layout order. Once retired (session ended) the board
/// must not be reshuffled again.
#[derive(Clone, Debug)]
pub struct Board {
    dimensions: Dimensions,
    difficulty: Difficulty,
    theme: Theme,
    cards: Vec<Card>,
    /// Card handle -> slot in `cards`.
    slots: FxHashMap<CardId, usize>,
    retired: bool,
}

impl Board {
    /// Build and shuffle a deck for the given size and difficulty.
    pub fn generate(
        rows: u8,
        columns: u8,
        theme: Theme,
        difficulty: Difficulty,
        rng: &mut GameRng,
    ) -> Result<Self, BoardError> {
        let dimensions = Dimensions::new(rows, columns);
        dimensions.check_bounds()?;

        let total = dimensions.total();
        let quota = special_card_quota(total, difficulty)?;
        let regular = total
            .checked_sub(quota)
            .ok_or(BoardError::UnbalancedDeck { total, quota, regular: 0 })?;
        if regular % 2 != 0 || regular < MIN_REGULAR {
            return Err(BoardError::UnbalancedDeck { total, quota, regular });
        }

        let pairs = regular / 2;
        if pairs > FACE_POOL_SIZE {
            return Err(BoardError::FacePoolExhausted { pairs, pool: FACE_POOL_SIZE });
        }

        let pool: Vec<PairId> = (1..=u32::from(FACE_POOL_SIZE)).map(PairId::new).collect();
        let faces = rng.sample_distinct(&pool, usize::from(pairs));

        let mut next_id = 0u32;
        let mut alloc = || {
            let id = CardId::new(next_id);
            next_id += 1;
            id
        };

        let mut cards = Vec::with_capacity(usize::from(total));
        for pair in faces {
            cards.push(Card::regular(alloc(), pair));
            cards.push(Card::regular(alloc(), pair));
        }
        for &kind in special_composition(quota) {
            cards.push(Card::special(alloc(), kind));
        }

        rng.shuffle(&mut cards);

        debug!(%dimensions, %difficulty, %theme, quota, pairs, "dealt board");

        let mut board = Self {
            dimensions,
            difficulty,
            theme,
            cards,
            slots: FxHashMap::default(),
            retired: false,
        };
        board.reindex();
        Ok(board)
    }

    fn reindex(&mut self) {
        self.slots = self
            .cards
            .iter()
            .enumerate()
            .map(|(slot, card)| (card.id(), slot))
            .collect();
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Number of cards, resolved ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in layout order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card handles in layout order.
    #[must_use]
    pub fn order(&self) -> Vec<CardId> {
        self.cards.iter().map(Card::id).collect()
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.slots.get(&id).map(|&slot| &self.cards[slot])
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        assert!(!self.retired, "board mutated after session end");
        self.slots.get(&id).map(|&slot| &mut self.cards[slot])
    }

    /// Number of Hint and Shuffle cards.
    #[must_use]
    pub fn special_count(&self) -> usize {
        self.cards.iter().filter(|c| c.kind().is_special()).count()
    }

    /// Cards still in play.
    pub fn live_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| !c.is_resolved())
    }

    /// Every card removed from play.
    #[must_use]
    pub fn all_resolved(&self) -> bool {
        self.cards.iter().all(Card::is_resolved)
    }

    /// Face-down live regular card that pairs with `card`.
    #[must_use]
    pub fn find_hidden_partner(&self, card: CardId) -> Option<CardId> {
        let card = self.card(card)?;
        if card.kind() != CardKind::Regular {
            return None;
        }
        self.cards
            .iter()
            .find(|other| other.is_selectable() && card.pairs_with(other))
            .map(Card::id)
    }

    /// Fisher–Yates over the live cards. Resolved cards keep their slots.
    ///
    /// # Panics
    /// If the board has been retired.
    pub fn reshuffle(&mut self, rng: &mut GameRng) {
        assert!(!self.retired, "reshuffle on a board whose session has ended");

        let live_slots: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_resolved())
            .map(|(slot, _)| slot)
            .collect();
        let mut live: Vec<Card> = live_slots.iter().map(|&slot| self.cards[slot].clone()).collect();

        rng.shuffle(&mut live);

        for (slot, card) in live_slots.into_iter().zip(live) {
            self.cards[slot] = card;
        }
        self.reindex();
        debug!(live = self.live_cards().count(), "reshuffled board");
    }

    /// Mark the board as belonging to a finished session.
    pub fn retire(&mut self) {
        self.retired = true;
    }

    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.retired
    }
}
