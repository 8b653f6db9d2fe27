//! Blocks and their states.

use im::OrdMap;
use voxecute_foundation::StateValue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::qualify_type;

/// A placed block: its type id plus state values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    /// Namespaced block id, e.g. `minecraft:stone`.
    pub id: String,
    /// State name to value.
    pub states: OrdMap<String, StateValue>,
}

impl Block {
    /// Creates a block with no states.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: qualify_type(id),
            states: OrdMap::new(),
        }
    }

    /// Air.
    #[must_use]
    pub fn air() -> Self {
        Self::new("air")
    }

    /// Sets a state.
    #[must_use]
    pub fn with_state(mut self, name: impl Into<String>, value: StateValue) -> Self {
        self.states.insert(name.into(), value);
        self
    }

    /// Looks up a state.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<&StateValue> {
        self.states.get(name)
    }
}
