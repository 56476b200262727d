//! Notifications from the session to the presentation layer.
//!
//! The session queues a `SessionEvent` for everything the presentation
//! layer must render. Callers either drain the queue and match on the
//! events, or hand each event to a [`SessionObserver`].

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

use super::scoring::StarRating;

/// Something the presentation layer should react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh board was dealt (session start or restart).
    BoardDealt { order: Vec<CardId> },

    /// A card turned face-up/down or left play.
    CardStateChanged {
        card: CardId,
        revealed: bool,
        resolved: bool,
    },

    /// Live cards changed position; lay out the board again.
    BoardReshuffled { order: Vec<CardId> },

    /// Move count or star rating changed.
    ScoreChanged { moves: u32, stars: StarRating },

    /// One second of play elapsed.
    Tick {
        elapsed_seconds: u32,
        formatted: String,
    },

    /// The session was paused or resumed.
    PauseChanged { paused: bool },

    /// Every card has been resolved. Fired once per dealt board.
    SessionComplete {
        moves: u32,
        elapsed_seconds: u32,
        stars: StarRating,
    },
}

impl SessionEvent {
    /// Forward this event to the matching observer callback.
    pub fn dispatch<O: SessionObserver + ?Sized>(&self, observer: &mut O) {
        match self {
            SessionEvent::BoardDealt { order } => observer.on_board_dealt(order),
            SessionEvent::CardStateChanged { card, revealed, resolved } => {
                observer.on_card_state_changed(*card, *revealed, *resolved);
            }
            SessionEvent::BoardReshuffled { order } => observer.on_board_reshuffled(order),
            SessionEvent::ScoreChanged { moves, stars } => observer.on_score_changed(*moves, *stars),
            SessionEvent::Tick { elapsed_seconds, formatted } => {
                observer.on_tick(*elapsed_seconds, formatted);
            }
            SessionEvent::PauseChanged { paused } => observer.on_pause_changed(*paused),
            SessionEvent::SessionComplete { moves, elapsed_seconds, stars } => {
                observer.on_session_complete(*moves, *elapsed_seconds, *stars);
            }
        }
    }
}

/// Presentation-side callbacks. Every method defaults to doing nothing.
pub trait SessionObserver {
    fn on_board_dealt(&mut self, _order: &[CardId]) {}

    fn on_card_state_changed(&mut self, _card: CardId, _revealed: bool, _resolved: bool) {}

    fn on_board_reshuffled(&mut self, _order: &[CardId]) {}

    fn on_score_changed(&mut self, _moves: u32, _stars: StarRating) {}

    fn on_tick(&mut self, _elapsed_seconds: u32, _formatted: &str) {}

    fn on_pause_changed(&mut self, _paused: bool) {}

    fn on_session_complete(&mut self, _moves: u32, _elapsed_seconds: u32, _stars: StarRating) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        flips: Vec<(CardId, bool, bool)>,
        ticks: Vec<String>,
        completed: Option<(u32, u32, StarRating)>,
    }

    impl SessionObserver for Recorder {
        fn on_card_state_changed(&mut self, card: CardId, revealed: bool, resolved: bool) {
            self.flips.push((card, revealed, resolved));
        }

        fn on_tick(&mut self, _elapsed_seconds: u32, formatted: &str) {
            self.ticks.push(formatted.to_string());
        }

        fn on_session_complete(&mut self, moves: u32, elapsed_seconds: u32, stars: StarRating) {
            self.completed = Some((moves, elapsed_seconds, stars));
        }
    }

    #[test]
    fn test_dispatch_routes_to_callbacks() {
        let events = vec![
            SessionEvent::CardStateChanged { card: CardId::new(3), revealed: true, resolved: false },
            SessionEvent::Tick { elapsed_seconds: 61, formatted: "01:01".to_string() },
            SessionEvent::PauseChanged { paused: true },
            SessionEvent::SessionComplete { moves: 4, elapsed_seconds: 61, stars: StarRating::new(3) },
        ];

        let mut recorder = Recorder::default();
        for event in &events {
            event.dispatch(&mut recorder);
        }

        assert_eq!(recorder.flips, vec![(CardId::new(3), true, false)]);
        assert_eq!(recorder.ticks, vec!["01:01".to_string()]);
        assert_eq!(recorder.completed, Some((4, 61, StarRating::new(3))));
    }

    #[test]
    fn test_event_serde() {
        let event = SessionEvent::ScoreChanged { moves: 2, stars: StarRating::new(1) };
        let json = serde_json::to_string(&event).unwrap();
        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
