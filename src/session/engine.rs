//! The turn state machine.
//!
//! `Session` owns the board, the timer and the scheduler for one game. The
//! presentation layer calls [`Session::activate`] when a card is clicked,
//! [`Session::advance`] as time passes, and drains [`SessionEvent`]s to
//! render.
//!
//! ## Turn flow
//!
//! ```text
//! Idle --activate--> OneSelected --activate--> Resolving --delay--> Idle
//! ```
//!
//! On the second pick the pair is classified (first match wins):
//!
//! 1. Shuffle card involved: a regular partner is hidden at once; after the
//!    delay the shuffle card leaves play and the live cards are rescrambled.
//! 2. Hint card involved: a regular partner's hidden twin is revealed; after
//!    the delay all three leave play. Without a twin only the hint leaves.
//! 3. Equal pair ids: both leave play after the delay.
//! 4. Otherwise both turn face down after the delay.
//!
//! Every pairing without a shuffle card counts as a move, counted before
//! the outcome is known.
//!
//! ```
//! use std::time::Duration;
//! use rust_pairs::cards::Theme;
//! use rust_pairs::core::{SessionConfig, SessionSetup};
//! use rust_pairs::difficulty::Difficulty;
//! use rust_pairs::session::{Activation, Session};
//!
//! let setup = SessionSetup::preset(Difficulty::Easy, Theme::Animals);
//! let mut session = Session::start(setup, SessionConfig::default().with_seed(1)).unwrap();
//!
//! let ids = session.board().order();
//! assert_eq!(session.activate(ids[0]), Activation::Selected);
//! assert!(matches!(session.activate(ids[1]), Activation::Resolving(_)));
//! assert_eq!(session.moves(), 1);
//!
//! session.advance(Duration::from_secs(2));
//! assert!(!session.is_locked());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, instrument, trace, warn};

use crate::board::Board;
use crate::cards::{CardId, CardKind};
use crate::core::{GameRng, PendingOnPause, SessionConfig, SessionSetup, StrandedPartner};
use crate::error::BoardError;
use crate::timer::SessionTimer;

use super::events::{SessionEvent, SessionObserver};
use super::scheduler::{Resolution, Scheduler};
use super::scoring::{SessionSummary, StarRating};

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Accepting activations.
    Active,
    /// Every card resolved.
    Complete,
    /// Abandoned via `end_session`.
    Ended,
}

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Idle,
    OneSelected,
    /// Two cards picked, outcome pending.
    Resolving,
}

/// Classification of a two-card pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairKind {
    Shuffle,
    Hint,
    Match,
    Mismatch,
}

/// Why an activation was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Session complete or ended.
    SessionOver,
    Paused,
    /// A resolution is pending.
    Locked,
    /// No card with this handle on the board.
    UnknownCard,
    /// Card already face-up or resolved.
    Unavailable,
}

/// Outcome of [`Session::activate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Ignored(IgnoreReason),
    /// First card of the turn revealed.
    Selected,
    /// Second card revealed; the pair resolves after a delay.
    Resolving(PairKind),
}

/// One playthrough: board, timer, score and the turn state machine.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    setup: SessionSetup,
    rng: GameRng,
    board: Board,
    timer: SessionTimer,
    scheduler: Scheduler,
    selection: SmallVec<[CardId; 2]>,
    moves: u32,
    stars: StarRating,
    paused: bool,
    status: SessionStatus,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Deal a board and start the clock.
    #[instrument(skip(config))]
    pub fn start(setup: SessionSetup, config: SessionConfig) -> Result<Self, BoardError> {
        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let board = Self::deal(&setup, &mut rng)?;

        let mut session = Self {
            config,
            setup,
            rng,
            board,
            timer: SessionTimer::new(),
            scheduler: Scheduler::new(),
            selection: SmallVec::new(),
            moves: 0,
            stars: StarRating::MAX,
            paused: false,
            status: SessionStatus::Active,
            events: Vec::new(),
        };
        session.timer.start();
        session.events.push(SessionEvent::BoardDealt {
            order: session.board.order(),
        });
        info!(seed = session.rng.seed(), cards = session.board.len(), "session started");
        Ok(session)
    }

    fn deal(setup: &SessionSetup, rng: &mut GameRng) -> Result<Board, BoardError> {
        let mut deal_rng = rng.fork();
        Board::generate(
            setup.dimensions.rows,
            setup.dimensions.columns,
            setup.theme,
            setup.difficulty,
            &mut deal_rng,
        )
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn setup(&self) -> &SessionSetup {
        &self.setup
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn stars(&self) -> StarRating {
        self.stars
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// A resolution is pending; activations are refused.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.scheduler.is_pending()
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        match self.selection.len() {
            0 => TurnPhase::Idle,
            1 => TurnPhase::OneSelected,
            _ => TurnPhase::Resolving,
        }
    }

    /// Face-up cards of the current turn.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    /// The resolution waiting for its delay, if any.
    #[must_use]
    pub fn pending_resolution(&self) -> Option<Resolution> {
        self.scheduler.peek()
    }

    #[must_use]
    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.timer.elapsed_seconds()
    }

    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.timer.formatted_time()
    }

    /// Statistics for the result screen.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(self.moves, self.elapsed_seconds(), self.stars, self.board.len())
    }

    /// Take all queued notifications.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain queued notifications into an observer.
    pub fn dispatch_events<O: SessionObserver + ?Sized>(&mut self, observer: &mut O) {
        for event in self.drain_events() {
            event.dispatch(observer);
        }
    }

    // === Input ===

    /// A card was clicked.
    #[instrument(level = "debug", skip(self))]
    pub fn activate(&mut self, card: CardId) -> Activation {
        if let Some(reason) = self.rejection(card) {
            debug!(?reason, "activation ignored");
            return Activation::Ignored(reason);
        }

        self.set_revealed(card, true);
        self.selection.push(card);
        if self.selection.len() == 1 {
            return Activation::Selected;
        }

        let (first, second) = (self.selection[0], self.selection[1]);
        let kind = self.classify(first, second);
        if kind != PairKind::Shuffle {
            self.record_move();
        }
        debug!(?kind, %first, %second, "pair picked");

        match kind {
            PairKind::Shuffle => self.begin_shuffle(first, second),
            PairKind::Hint => self.begin_hint(first, second),
            PairKind::Match => {
                let delay = self.config.match_delay();
                self.scheduler.schedule_after(delay, Resolution::Match { first, second });
            }
            PairKind::Mismatch => {
                let delay = self.config.mismatch_delay();
                self.scheduler.schedule_after(delay, Resolution::Mismatch { first, second });
            }
        }
        Activation::Resolving(kind)
    }

    fn rejection(&self, card: CardId) -> Option<IgnoreReason> {
        if self.status != SessionStatus::Active {
            return Some(IgnoreReason::SessionOver);
        }
        if self.paused {
            return Some(IgnoreReason::Paused);
        }
        if self.is_locked() {
            return Some(IgnoreReason::Locked);
        }
        match self.board.card(card) {
            None => {
                warn!(%card, "activation for a card not on the board");
                Some(IgnoreReason::UnknownCard)
            }
            Some(c) if !c.is_selectable() => Some(IgnoreReason::Unavailable),
            Some(_) => None,
        }
    }

    fn kind_of(&self, card: CardId) -> CardKind {
        self.board.card(card).map_or(CardKind::Regular, |c| c.kind())
    }

    fn classify(&self, first: CardId, second: CardId) -> PairKind {
        let kinds = [self.kind_of(first), self.kind_of(second)];
        if kinds.contains(&CardKind::Shuffle) {
            PairKind::Shuffle
        } else if kinds.contains(&CardKind::Hint) {
            PairKind::Hint
        } else {
            let pairs = self
                .board
                .card(first)
                .zip(self.board.card(second))
                .is_some_and(|(a, b)| a.pairs_with(b));
            if pairs {
                PairKind::Match
            } else {
                PairKind::Mismatch
            }
        }
    }

    fn begin_shuffle(&mut self, first: CardId, second: CardId) {
        let (shuffle, other) = if self.kind_of(first) == CardKind::Shuffle {
            (first, second)
        } else {
            (second, first)
        };
        // The partner's reveal is transient.
        if self.kind_of(other) == CardKind::Regular {
            self.set_revealed(other, false);
        }
        let delay = self.config.shuffle_delay();
        self.scheduler.schedule_after(delay, Resolution::Shuffle { shuffle, other });
    }

    fn begin_hint(&mut self, first: CardId, second: CardId) {
        let (hint, other) = if self.kind_of(first) == CardKind::Hint {
            (first, second)
        } else {
            (second, first)
        };
        let partner = if self.kind_of(other) == CardKind::Regular {
            self.board.find_hidden_partner(other)
        } else {
            None
        };

        match partner {
            Some(partner) => {
                self.set_revealed(partner, true);
                let delay = self.config.hint_match_delay();
                self.scheduler
                    .schedule_after(delay, Resolution::HintWithPartner { hint, other, partner });
            }
            None => {
                let delay = self.config.hint_delay();
                self.scheduler.schedule_after(delay, Resolution::LoneHint { hint, other });
            }
        }
    }

    // === Time ===

    /// Let `dt` of wall time pass.
    ///
    /// Timer ticks and the pending resolution fire in chronological order.
    /// When both fall on the same instant the tick fires first.
    pub fn advance(&mut self, mut dt: Duration) {
        if self.status == SessionStatus::Ended {
            return;
        }
        loop {
            let countdown = self.countdown_running();
            let next_resolution = if countdown { self.scheduler.remaining() } else { None };
            let next_tick = self.timer.until_next_tick();

            match next_resolution.into_iter().chain(next_tick).min() {
                Some(step) if step <= dt => {
                    self.elapse(step, countdown);
                    dt -= step;
                    self.fire_due();
                }
                _ => {
                    self.elapse(dt, countdown);
                    break;
                }
            }
        }
    }

    fn countdown_running(&self) -> bool {
        !self.paused || self.config.pending_on_pause == PendingOnPause::FireThrough
    }

    fn elapse(&mut self, dt: Duration, countdown: bool) {
        for elapsed_seconds in self.timer.advance(dt) {
            // Stars only depend on moves, so this never changes the rating.
            self.stars = StarRating::for_moves(self.moves, self.board.len());
            trace!(elapsed_seconds, "tick");
            self.events.push(SessionEvent::Tick {
                elapsed_seconds,
                formatted: self.timer.formatted_time(),
            });
        }
        if countdown {
            self.scheduler.advance(dt);
        }
    }

    fn fire_due(&mut self) {
        if let Some(resolution) = self.scheduler.take_due() {
            self.apply(resolution);
        }
    }

    fn apply(&mut self, resolution: Resolution) {
        debug!(?resolution, "resolving");
        match resolution {
            Resolution::Match { first, second } => {
                self.resolve(first);
                self.resolve(second);
            }
            Resolution::Mismatch { first, second } => {
                self.set_revealed(first, false);
                self.set_revealed(second, false);
            }
            Resolution::HintWithPartner { hint, other, partner } => {
                self.resolve(hint);
                self.resolve(other);
                self.resolve(partner);
            }
            Resolution::LoneHint { hint, other } => {
                self.resolve(hint);
                self.release_stranded(other);
            }
            Resolution::Shuffle { shuffle, other } => {
                self.resolve(shuffle);
                self.board.reshuffle(&mut self.rng);
                self.events.push(SessionEvent::BoardReshuffled {
                    order: self.board.order(),
                });
                self.release_stranded(other);
            }
        }
        self.selection.clear();
        self.check_completion();
    }

    fn release_stranded(&mut self, card: CardId) {
        if self.config.stranded_partner == StrandedPartner::KeepRevealed {
            return;
        }
        if self.board.card(card).is_some_and(|c| c.is_revealed() && !c.is_resolved()) {
            self.set_revealed(card, false);
        }
    }

    fn check_completion(&mut self) {
        if self.status != SessionStatus::Active {
            return;
        }
        if self.board.live_cards().any(|c| c.kind() == CardKind::Regular) {
            return;
        }
        // Special cards never pair with each other; once the regular cards
        // are gone any leftovers leave play with them.
        let leftovers: Vec<CardId> = self.board.live_cards().map(|c| c.id()).collect();
        for card in leftovers {
            self.resolve(card);
        }
        debug_assert!(self.board.all_resolved());

        self.timer.stop();
        self.status = SessionStatus::Complete;
        info!(
            moves = self.moves,
            elapsed = self.timer.elapsed_seconds(),
            stars = self.stars.value(),
            "session complete"
        );
        self.events.push(SessionEvent::SessionComplete {
            moves: self.moves,
            elapsed_seconds: self.timer.elapsed_seconds(),
            stars: self.stars,
        });
    }

    // === Card mutation ===

    fn set_revealed(&mut self, card: CardId, revealed: bool) {
        if let Some(c) = self.board.card_mut(card) {
            if c.set_revealed(revealed) {
                self.events.push(SessionEvent::CardStateChanged {
                    card,
                    revealed,
                    resolved: false,
                });
            }
        }
    }

    fn resolve(&mut self, card: CardId) {
        if let Some(c) = self.board.card_mut(card) {
            c.resolve();
            let revealed = c.is_revealed();
            self.events.push(SessionEvent::CardStateChanged {
                card,
                revealed,
                resolved: true,
            });
        }
    }

    fn record_move(&mut self) {
        self.moves += 1;
        self.stars = StarRating::for_moves(self.moves, self.board.len());
        self.events.push(SessionEvent::ScoreChanged {
            moves: self.moves,
            stars: self.stars,
        });
    }

    // === Lifecycle ===

    /// Suspend play. No-op if already paused or the session is over.
    #[instrument(skip(self))]
    pub fn pause(&mut self) {
        if self.status != SessionStatus::Active || self.paused {
            return;
        }
        self.paused = true;
        self.timer.stop();
        self.events.push(SessionEvent::PauseChanged { paused: true });
    }

    /// Continue play. No-op if not paused or the session is over.
    #[instrument(skip(self))]
    pub fn resume(&mut self) {
        if self.status != SessionStatus::Active || !self.paused {
            return;
        }
        self.paused = false;
        self.timer.start();
        self.events.push(SessionEvent::PauseChanged { paused: false });
    }

    /// Deal a fresh board with the same setup and zero the score and clock.
    ///
    /// Any pending resolution from the old board is discarded. A paused
    /// session is unpaused.
    #[instrument(skip(self))]
    pub fn restart_session(&mut self) -> Result<(), BoardError> {
        self.scheduler.invalidate();
        self.board = Self::deal(&self.setup, &mut self.rng)?;
        self.selection.clear();
        self.moves = 0;
        self.stars = StarRating::MAX;
        let was_paused = std::mem::replace(&mut self.paused, false);
        self.status = SessionStatus::Active;
        self.timer.reset();
        self.timer.start();

        self.events.push(SessionEvent::BoardDealt {
            order: self.board.order(),
        });
        self.events.push(SessionEvent::ScoreChanged {
            moves: 0,
            stars: self.stars,
        });
        if was_paused {
            self.events.push(SessionEvent::PauseChanged { paused: false });
        }
        info!(cards = self.board.len(), "session restarted");
        Ok(())
    }

    /// Abandon the session. The board is retired and must not change again.
    #[instrument(skip(self))]
    pub fn end_session(&mut self) {
        if self.status == SessionStatus::Ended {
            return;
        }
        self.scheduler.invalidate();
        self.timer.stop();
        self.selection.clear();
        self.board.retire();
        self.status = SessionStatus::Ended;
        info!(moves = self.moves, elapsed = self.timer.elapsed_seconds(), "session ended");
    }
}
