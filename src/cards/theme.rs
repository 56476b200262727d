//! Card themes.
//!
//! The engine treats a theme as an opaque token. The presentation layer
//! resolves `(theme, pair id, kind)` to an image.

use serde::{Deserialize, Serialize};

/// Face set used for regular cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Animals,
    Geometry,
    Plants,
}

impl Theme {
    /// All themes, in menu order.
    pub const ALL: [Theme; 3] = [Theme::Animals, Theme::Geometry, Theme::Plants];

    /// Stable lowercase token, e.g. an asset folder name.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Theme::Animals => "animals",
            Theme::Geometry => "geometry",
            Theme::Plants => "plants",
        }
    }

    /// Parse a theme token. Unknown tokens fall back to `Animals`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Theme::ALL
            .into_iter()
            .find(|t| t.slug().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
