//! Entity allocation and per-entity host data.
//!
//! [`EntityStore`] hands out generational ids; [`EntityRecord`] is what the
//! host knows about one entity (type, placement, tags, player state).

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use im::OrdSet;
use voxecute_foundation::{DimensionId, EntityId, Error, Result, Rotation, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::player::PlayerState;

/// Entity type id of players.
pub const PLAYER_TYPE: &str = "minecraft:player";

/// Adds the `minecraft` namespace to a bare type id.
#[must_use]
pub fn qualify_type(id: &str) -> String {
    if id.contains(':') {
        id.to_string()
    } else {
        format!("minecraft:{id}")
    }
}

/// Generational id allocation.
///
/// Odd generations are alive, even generations are free. A destroyed slot is
/// reused with a bumped generation so old ids stop validating.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityStore {
    generations: Vec<u32>,
    free_list: Vec<u64>,
    live_count: usize,
}

impl EntityStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an id, reusing freed slots first.
    pub fn allocate(&mut self) -> EntityId {
        self.live_count += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.generations[index as usize];
            *slot += 1;
            EntityId::new(index, *slot)
        } else {
            let index = self.generations.len() as u64;
            self.generations.push(1);
            EntityId::new(index, 1)
        }
    }

    /// Releases an id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or was never allocated.
    pub fn release(&mut self, id: EntityId) -> Result<()> {
        self.validate(id)?;
        self.generations[id.index as usize] += 1;
        self.free_list.push(id.index);
        self.live_count -= 1;
        Ok(())
    }

    /// Checks that `id` refers to a live slot.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` for an unknown index or a slot released but
    /// not yet reused, and `StaleEntity` once the slot has been reused.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        match self.generations.get(id.index as usize) {
            None => Err(Error::entity_not_found(id)),
            Some(&current) if current == id.generation && current % 2 == 1 => Ok(()),
            Some(&current) if current % 2 == 0 && current <= id.generation.saturating_add(1) => {
                Err(Error::entity_not_found(id))
            }
            Some(_) => Err(Error::stale_entity(id)),
        }
    }

    /// Returns the number of live ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if no ids are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }
}

/// Host data for one entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityRecord {
    /// Namespaced entity type, e.g. `minecraft:zombie`.
    pub entity_type: String,
    /// Name tag or player name.
    pub name: Option<String>,
    /// Dimension the entity is in.
    pub dimension: DimensionId,
    /// Feet position.
    pub location: Vec3,
    /// Eye height above the feet.
    pub eye_height: f64,
    /// Facing.
    pub rotation: Rotation,
    /// Scoreboard-style tags.
    pub tags: OrdSet<String>,
    /// Type families, e.g. `monster`, `undead`.
    pub families: OrdSet<String>,
    /// False once the entity has died but is still tracked (players only).
    pub alive: bool,
    /// Present for players.
    pub player: Option<PlayerState>,
}

impl EntityRecord {
    /// Creates a record for an entity of the given type at the origin of the overworld.
    #[must_use]
    pub fn new(entity_type: &str) -> Self {
        Self {
            entity_type: qualify_type(entity_type),
            name: None,
            dimension: DimensionId::overworld(),
            location: Vec3::ZERO,
            eye_height: 1.62,
            rotation: Rotation::default(),
            tags: OrdSet::new(),
            families: OrdSet::new(),
            alive: true,
            player: None,
        }
    }

    /// Creates a player record.
    #[must_use]
    pub fn player(name: &str) -> Self {
        let mut record = Self::new(PLAYER_TYPE).named(name);
        record.player = Some(PlayerState::default());
        record
    }

    /// Sets the name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the feet position.
    #[must_use]
    pub fn at(mut self, location: Vec3) -> Self {
        self.location = location;
        self
    }

    /// Sets the dimension.
    #[must_use]
    pub fn in_dimension(mut self, dimension: DimensionId) -> Self {
        self.dimension = dimension;
        self
    }

    /// Sets the facing.
    #[must_use]
    pub fn facing(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the eye height.
    #[must_use]
    pub fn with_eye_height(mut self, eye_height: f64) -> Self {
        self.eye_height = eye_height;
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Adds a family.
    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.families.insert(family.into());
        self
    }

    /// Replaces the player state. Has no effect on non-players.
    #[must_use]
    pub fn with_player_state(mut self, state: PlayerState) -> Self {
        if self.player.is_some() {
            self.player = Some(state);
        }
        self
    }

    /// Marks the entity dead.
    #[must_use]
    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }

    /// Returns true for players.
    #[must_use]
    pub fn is_player(&self) -> bool {
        self.player.is_some()
    }

    /// Eye position.
    #[must_use]
    pub fn head_location(&self) -> Vec3 {
        self.location + Vec3::new(0.0, self.eye_height, 0.0)
    }
}
