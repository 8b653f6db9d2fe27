//! Scoreboard objectives and scores.

use std::fmt;

use im::OrdMap;
use voxecute_foundation::EntityId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Who a score belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScoreHolder {
    /// A live entity (players included).
    Entity(EntityId),
    /// A named holder with no entity behind it.
    Fake(String),
}

impl fmt::Display for ScoreHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(id) => write!(f, "{id}"),
            Self::Fake(name) => f.write_str(name),
        }
    }
}

/// One objective and its scores.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Objective {
    /// Scores by holder.
    pub scores: OrdMap<ScoreHolder, i64>,
}

/// All objectives of a world.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scoreboard {
    objectives: OrdMap<String, Objective>,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an objective. Existing objectives keep their scores.
    pub fn add_objective(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.objectives.contains_key(&name) {
            self.objectives.insert(name, Objective::default());
        }
    }

    /// Returns true if the objective exists.
    #[must_use]
    pub fn has_objective(&self, name: &str) -> bool {
        self.objectives.contains_key(name)
    }

    /// Sets a score, creating the objective if needed.
    pub fn set(&mut self, objective: impl Into<String>, holder: ScoreHolder, value: i64) {
        let objective = objective.into();
        self.add_objective(objective.clone());
        if let Some(entry) = self.objectives.get_mut(&objective) {
            entry.scores.insert(holder, value);
        }
    }

    /// Reads a score. `None` when the objective or the score is missing.
    #[must_use]
    pub fn get(&self, objective: &str, holder: &ScoreHolder) -> Option<i64> {
        self.objectives.get(objective)?.scores.get(holder).copied()
    }
}
