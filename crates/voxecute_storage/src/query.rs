//! Entity query options understood by the host.
//!
//! An [`EntityQuery`] is what a selector hands to the world: the filters the
//! host can evaluate natively while gathering candidates. Everything here is
//! a conjunction; an empty query matches every entity.

use voxecute_foundation::{IntRange, Vec3};

use crate::entity::{EntityRecord, qualify_type};
use crate::player::GameMode;
use crate::scoreboard::{ScoreHolder, Scoreboard};

/// A `scores={objective=range}` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreFilter {
    /// Objective name.
    pub objective: String,
    /// Range the score must fall in.
    pub range: IntRange,
    /// When true the score must fall outside the range.
    pub exclude: bool,
}

/// Filters for gathering candidate entities.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityQuery {
    /// Reference point for distance and volume checks.
    pub location: Vec3,
    /// Maximum distance from `location` (`r`).
    pub max_distance: Option<f64>,
    /// Minimum distance from `location` (`rm`).
    pub min_distance: Option<f64>,
    /// Box extent from `location` (`dx`, `dy`, `dz`).
    pub volume: Option<Vec3>,
    /// Required entity type.
    pub entity_type: Option<String>,
    /// Excluded entity types.
    pub exclude_types: Vec<String>,
    /// Required name.
    pub name: Option<String>,
    /// Excluded names.
    pub exclude_names: Vec<String>,
    /// Required tags.
    pub tags: Vec<String>,
    /// Excluded tags.
    pub exclude_tags: Vec<String>,
    /// Required families.
    pub families: Vec<String>,
    /// Excluded families.
    pub exclude_families: Vec<String>,
    /// Required game mode (players only).
    pub game_mode: Option<GameMode>,
    /// Excluded game modes (players only).
    pub exclude_game_modes: Vec<GameMode>,
    /// Minimum experience level (`lm`).
    pub min_level: Option<i64>,
    /// Maximum experience level (`l`).
    pub max_level: Option<i64>,
    /// Minimum pitch (`rxm`).
    pub min_pitch: Option<f64>,
    /// Maximum pitch (`rx`).
    pub max_pitch: Option<f64>,
    /// Minimum yaw (`rym`).
    pub min_yaw: Option<f64>,
    /// Maximum yaw (`ry`).
    pub max_yaw: Option<f64>,
    /// Score requirements.
    pub scores: Vec<ScoreFilter>,
}

impl EntityQuery {
    /// Creates a query centred on `location` with no filters.
    #[must_use]
    pub fn at(location: Vec3) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    /// Returns true when the query uses a distance or volume filter.
    #[must_use]
    pub fn is_spatial(&self) -> bool {
        self.max_distance.is_some() || self.min_distance.is_some() || self.volume.is_some()
    }

    /// Checks a candidate entity against every filter.
    #[must_use]
    pub fn matches(&self, holder: ScoreHolder, record: &EntityRecord, scoreboard: &Scoreboard) -> bool {
        self.matches_placement(record)
            && self.matches_identity(record)
            && self.matches_player(record)
            && self.matches_scores(&holder, scoreboard)
    }

    fn matches_placement(&self, record: &EntityRecord) -> bool {
        let distance = record.location.distance(self.location);
        if self.max_distance.is_some_and(|r| distance > r)
            || self.min_distance.is_some_and(|rm| distance < rm)
        {
            return false;
        }
        if let Some(volume) = self.volume {
            let inside = (0..3).all(|axis| {
                let start = self.location.axis(axis);
                let end = start + volume.axis(axis);
                let (low, high) = (start.min(end).floor(), start.max(end).floor() + 1.0);
                let v = record.location.axis(axis);
                v >= low && v < high
            });
            if !inside {
                return false;
            }
        }
        let (yaw, pitch) = (record.rotation.yaw(), record.rotation.pitch());
        !(self.min_pitch.is_some_and(|m| pitch < m)
            || self.max_pitch.is_some_and(|m| pitch > m)
            || self.min_yaw.is_some_and(|m| yaw < m)
            || self.max_yaw.is_some_and(|m| yaw > m))
    }

    fn matches_identity(&self, record: &EntityRecord) -> bool {
        if let Some(t) = &self.entity_type {
            if qualify_type(t) != record.entity_type {
                return false;
            }
        }
        if self
            .exclude_types
            .iter()
            .any(|t| qualify_type(t) == record.entity_type)
        {
            return false;
        }
        let name = record.name.as_deref();
        if self.name.as_deref().is_some_and(|n| name != Some(n)) {
            return false;
        }
        if self.exclude_names.iter().any(|n| name == Some(n.as_str())) {
            return false;
        }
        self.tags.iter().all(|t| record.tags.contains(t))
            && !self.exclude_tags.iter().any(|t| record.tags.contains(t))
            && self.families.iter().all(|f| record.families.contains(f))
            && !self.exclude_families.iter().any(|f| record.families.contains(f))
    }

    fn matches_player(&self, record: &EntityRecord) -> bool {
        let wants_player = self.game_mode.is_some()
            || !self.exclude_game_modes.is_empty()
            || self.min_level.is_some()
            || self.max_level.is_some();
        if !wants_player {
            return true;
        }
        let Some(player) = &record.player else {
            return false;
        };
        self.game_mode.is_none_or(|m| player.game_mode == m)
            && !self.exclude_game_modes.contains(&player.game_mode)
            && self.min_level.is_none_or(|l| player.level >= l)
            && self.max_level.is_none_or(|l| player.level <= l)
    }

    fn matches_scores(&self, holder: &ScoreHolder, scoreboard: &Scoreboard) -> bool {
        self.scores.iter().all(|filter| {
            scoreboard
                .get(&filter.objective, holder)
                .is_some_and(|score| filter.range.contains(score) != filter.exclude)
        })
    }
}
