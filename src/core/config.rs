//! Session configuration.
//!
//! - `SessionSetup`: what to deal (difficulty, board shape, theme)
//! - `SessionConfig`: how the session behaves (seed, resolution delays,
//!   pause and stranded-card policies)

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::Theme;
use crate::difficulty::{validate_custom, Difficulty, Dimensions};
use crate::error::BoardError;

/// What a pending resolution does while the session is paused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingOnPause {
    /// The countdown stops while paused and continues on resume.
    #[default]
    Freeze,
    /// The countdown keeps running and the resolution fires while paused.
    FireThrough,
}

/// What happens to a face-up, unresolved partner of a consumed special card.
///
/// A second Hint picked with a Hint is the usual case. Left face-up it
/// cannot be picked again and is swept when the regular cards run out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrandedPartner {
    /// Leave it face-up and in play.
    #[default]
    KeepRevealed,
    /// Turn it face down so it can be picked again.
    Conceal,
}

/// Session behavior parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Random seed for dealing and reshuffling.
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Delay before a matched pair is removed.
    pub match_delay_ms: u64,

    /// Delay before a mismatched pair is turned back.
    pub mismatch_delay_ms: u64,

    /// Delay before a lone hint card is consumed.
    pub hint_delay_ms: u64,

    /// Delay before a hint, its card and the revealed partner are removed.
    pub hint_match_delay_ms: u64,

    /// Delay before a shuffle card is consumed and the board rescrambled.
    pub shuffle_delay_ms: u64,

    pub pending_on_pause: PendingOnPause,

    pub stranded_partner: StrandedPartner,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            match_delay_ms: 500,
            mismatch_delay_ms: 1000,
            hint_delay_ms: 1000,
            hint_match_delay_ms: 1500,
            shuffle_delay_ms: 1000,
            pending_on_pause: PendingOnPause::Freeze,
            stranded_partner: StrandedPartner::KeepRevealed,
        }
    }
}

impl SessionConfig {
    /// Set a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set every resolution delay to the same value.
    #[must_use]
    pub fn with_uniform_delay(mut self, delay_ms: u64) -> Self {
        self.match_delay_ms = delay_ms;
        self.mismatch_delay_ms = delay_ms;
        self.hint_delay_ms = delay_ms;
        self.hint_match_delay_ms = delay_ms;
        self.shuffle_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_pending_on_pause(mut self, policy: PendingOnPause) -> Self {
        self.pending_on_pause = policy;
        self
    }

    #[must_use]
    pub fn with_stranded_partner(mut self, policy: StrandedPartner) -> Self {
        self.stranded_partner = policy;
        self
    }

    pub(crate) fn match_delay(&self) -> Duration {
        Duration::from_millis(self.match_delay_ms)
    }

    pub(crate) fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub(crate) fn hint_delay(&self) -> Duration {
        Duration::from_millis(self.hint_delay_ms)
    }

    pub(crate) fn hint_match_delay(&self) -> Duration {
        Duration::from_millis(self.hint_match_delay_ms)
    }

    pub(crate) fn shuffle_delay(&self) -> Duration {
        Duration::from_millis(self.shuffle_delay_ms)
    }
}

/// What to deal for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSetup {
    pub difficulty: Difficulty,
    pub dimensions: Dimensions,
    pub theme: Theme,
}

impl SessionSetup {
    /// A preset level. `Difficulty::Custom` falls back to the 2x2 board.
    #[must_use]
    pub fn preset(difficulty: Difficulty, theme: Theme) -> Self {
        Self {
            difficulty,
            dimensions: difficulty.preset_dimensions().unwrap_or(Dimensions::new(2, 2)),
            theme,
        }
    }

    /// A validated custom level.
    pub fn custom(rows: u8, columns: u8, theme: Theme) -> Result<Self, BoardError> {
        Ok(Self {
            difficulty: Difficulty::Custom,
            dimensions: validate_custom(rows, columns)?,
            theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.match_delay(), Duration::from_millis(500));
        assert_eq!(config.mismatch_delay(), Duration::from_secs(1));
        assert_eq!(config.hint_match_delay(), Duration::from_millis(1500));
        assert_eq!(config.pending_on_pause, PendingOnPause::Freeze);
        assert_eq!(config.stranded_partner, StrandedPartner::KeepRevealed);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SessionConfig::default()
            .with_seed(123)
            .with_uniform_delay(10)
            .with_pending_on_pause(PendingOnPause::FireThrough)
            .with_stranded_partner(StrandedPartner::Conceal);

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.shuffle_delay(), Duration::from_millis(10));
        assert_eq!(config.hint_delay(), Duration::from_millis(10));
        assert_eq!(config.pending_on_pause, PendingOnPause::FireThrough);
        assert_eq!(config.stranded_partner, StrandedPartner::Conceal);
    }

    #[test]
    fn test_serialization() {
        let config = SessionConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_setup_constructors() {
        let setup = SessionSetup::preset(Difficulty::Hard, Theme::Geometry);
        assert_eq!(setup.dimensions, Dimensions::new(4, 4));

        let setup = SessionSetup::preset(Difficulty::Custom, Theme::Geometry);
        assert_eq!(setup.dimensions, Dimensions::new(2, 2));

        let setup = SessionSetup::custom(2, 5, Theme::Plants).unwrap();
        assert_eq!(setup.difficulty, Difficulty::Custom);
        assert_eq!(setup.dimensions.total(), 10);

        assert!(SessionSetup::custom(1, 2, Theme::Plants).is_err());
    }
}
