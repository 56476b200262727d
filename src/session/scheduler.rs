//! Deferred resolution: a single-shot, cancellable continuation.
//!
//! When a second card is picked, the session decides *what* will happen
//! right away but applies it only after a delay. The decision is stored
//! here as a [`Resolution`] value together with its countdown.
//!
//! ## Invariants
//!
//! - At most one resolution is pending. The session's lock guarantees it;
//!   scheduling a second one is a bug and panics.
//! - `invalidate()` drops the pending resolution, so nothing scheduled
//!   against a replaced or abandoned board ever fires.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// The continuation to run once the delay has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Remove both cards.
    Match { first: CardId, second: CardId },
    /// Turn both cards face down.
    Mismatch { first: CardId, second: CardId },
    /// Remove the hint, the card it was paired with and the revealed partner.
    HintWithPartner {
        hint: CardId,
        other: CardId,
        partner: CardId,
    },
    /// Remove only the hint.
    LoneHint { hint: CardId, other: CardId },
    /// Remove the shuffle card and rescramble the board.
    Shuffle { shuffle: CardId, other: CardId },
}

#[derive(Clone, Debug)]
struct Pending {
    remaining: Duration,
    resolution: Resolution,
}

/// Holds the pending resolution and its countdown.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    pending: Option<Pending>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `resolution` to fire after `delay`.
    ///
    /// # Panics
    /// If another resolution is already pending.
    pub fn schedule_after(&mut self, delay: Duration, resolution: Resolution) {
        assert!(
            self.pending.is_none(),
            "resolution scheduled while another is pending"
        );
        self.pending = Some(Pending {
            remaining: delay,
            resolution,
        });
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Countdown left on the pending resolution.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.remaining)
    }

    /// The pending resolution, if any.
    #[must_use]
    pub fn peek(&self) -> Option<Resolution> {
        self.pending.as_ref().map(|p| p.resolution)
    }

    /// Run the countdown forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if let Some(pending) = self.pending.as_mut() {
            pending.remaining = pending.remaining.saturating_sub(dt);
        }
    }

    /// Remove and return the pending resolution if its countdown is over.
    pub fn take_due(&mut self) -> Option<Resolution> {
        if self.pending.as_ref().is_some_and(|p| p.remaining.is_zero()) {
            self.pending.take().map(|p| p.resolution)
        } else {
            None
        }
    }

    /// Drop the pending resolution.
    pub fn invalidate(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch() -> Resolution {
        Resolution::Mismatch {
            first: CardId::new(0),
            second: CardId::new(1),
        }
    }

    #[test]
    fn test_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(Duration::from_millis(1000), mismatch());

        scheduler.advance(Duration::from_millis(999));
        assert!(scheduler.take_due().is_none());
        assert_eq!(scheduler.remaining(), Some(Duration::from_millis(1)));

        scheduler.advance(Duration::from_millis(5));
        let resolution = scheduler.take_due().unwrap();
        assert_eq!(resolution, mismatch());
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(Duration::ZERO, mismatch());
        assert!(scheduler.take_due().is_some());
    }

    #[test]
    fn test_invalidate_drops_pending() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(Duration::from_millis(500), mismatch());

        scheduler.invalidate();
        assert!(!scheduler.is_pending());

        scheduler.advance(Duration::from_secs(5));
        assert!(scheduler.take_due().is_none());

        let matched = Resolution::Match {
            first: CardId::new(2),
            second: CardId::new(3),
        };
        scheduler.schedule_after(Duration::ZERO, matched);
        assert_eq!(scheduler.take_due(), Some(matched));
    }

    #[test]
    #[should_panic(expected = "resolution scheduled while another is pending")]
    fn test_single_pending() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(Duration::from_millis(1), mismatch());
        scheduler.schedule_after(Duration::from_millis(1), mismatch());
    }
}
