//! Player-only state: game mode, experience level, and permissions.

use std::fmt;

use im::OrdMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A player's game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameMode {
    /// Survival mode.
    #[default]
    Survival,
    /// Creative mode.
    Creative,
    /// Adventure mode.
    Adventure,
    /// Spectator mode.
    Spectator,
}

impl GameMode {
    /// Parses a game mode from its name, short letter, or numeric id.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "survival" | "s" | "0" => Some(Self::Survival),
            "creative" | "c" | "1" => Some(Self::Creative),
            "adventure" | "a" | "2" => Some(Self::Adventure),
            "spectator" | "6" => Some(Self::Spectator),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Creative => "creative",
            Self::Adventure => "adventure",
            Self::Spectator => "spectator",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State the host tracks for players only.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayerState {
    /// Current game mode.
    pub game_mode: GameMode,
    /// Experience level.
    pub level: i64,
    /// Permission name to enabled state, e.g. `camera`, `movement`.
    pub permissions: OrdMap<String, bool>,
}

impl PlayerState {
    /// Sets the game mode.
    #[must_use]
    pub fn with_game_mode(mut self, game_mode: GameMode) -> Self {
        self.game_mode = game_mode;
        self
    }

    /// Sets the experience level.
    #[must_use]
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = level;
        self
    }

    /// Sets a permission.
    #[must_use]
    pub fn with_permission(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.permissions.insert(name.into(), enabled);
        self
    }

    /// Whether a permission is enabled. Unlisted permissions are enabled.
    #[must_use]
    pub fn permission(&self, name: &str) -> bool {
        self.permissions.get(name).copied().unwrap_or(true)
    }
}
