//! Host world capabilities and an in-memory implementation.
//!
//! The engine only talks to the world through [`WorldAccess`] (reads) and
//! [`WorldMut`] (tag edits and command submission). [`World`] implements both
//! with persistent maps, so cloning a world is cheap and tests can keep
//! snapshots around.

use im::{HashMap, OrdMap, OrdSet, Vector};
use voxecute_foundation::{BlockPos, DimensionId, EntityId, Error, Result};

use crate::block::Block;
use crate::entity::{EntityRecord, EntityStore};
use crate::query::EntityQuery;
use crate::scoreboard::{ScoreHolder, Scoreboard};

/// Read access to live world state.
pub trait WorldAccess {
    /// Every dimension the world knows about.
    fn dimensions(&self) -> Vec<DimensionId>;

    /// Looks up an entity. `None` once it has been removed.
    fn entity(&self, id: EntityId) -> Option<&EntityRecord>;

    /// Living entities in `dimension` matching `query`, in entity id order.
    ///
    /// A respawned entity that reuses a freed slot sorts by that slot, not by
    /// when it spawned.
    fn query_entities(&self, dimension: &DimensionId, query: &EntityQuery) -> Vec<EntityId>;

    /// Players in `dimension` matching `query`, dead players included.
    fn query_players(&self, dimension: &DimensionId, query: &EntityQuery) -> Vec<EntityId>;

    /// The block at `pos`. `None` when the position is not loaded.
    fn block(&self, dimension: &DimensionId, pos: BlockPos) -> Option<&Block>;

    /// A score. `None` when the objective or the score is missing.
    fn score(&self, objective: &str, holder: &ScoreHolder) -> Option<i64>;

    /// Finds a player by exact name.
    fn player_named(&self, name: &str) -> Option<EntityId>;
}

/// Where a submitted command runs from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandSource {
    /// Run as an entity.
    Entity(EntityId),
    /// Run from a dimension with no entity behind it.
    Dimension(DimensionId),
}

/// A command the world accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedCommand {
    /// Where it ran from.
    pub source: CommandSource,
    /// The command text.
    pub command: String,
}

/// Mutations the engine needs while running terminal actions.
pub trait WorldMut: WorldAccess {
    /// Adds a tag to an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    fn add_tag(&mut self, id: EntityId, tag: &str) -> Result<()>;

    /// Removes a tag from an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    fn remove_tag(&mut self, id: EntityId, tag: &str) -> Result<()>;

    /// Submits command text, returning the number of successes.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if the host rejects the command.
    fn submit_command(&mut self, source: &CommandSource, command: &str) -> Result<u32>;
}

/// In-memory world state.
#[derive(Clone, Debug, Default)]
pub struct World {
    store: EntityStore,
    entities: OrdMap<EntityId, EntityRecord>,
    dimensions: OrdSet<DimensionId>,
    blocks: HashMap<(DimensionId, BlockPos), Block>,
    scoreboard: Scoreboard,
    rejected_commands: OrdSet<String>,
    command_log: Vector<SubmittedCommand>,
}

impl World {
    /// Creates a world with the three standard dimensions.
    #[must_use]
    pub fn new() -> Self {
        let mut world = Self::default();
        for name in [DimensionId::OVERWORLD, DimensionId::NETHER, DimensionId::THE_END] {
            world.dimensions.insert(DimensionId::new(name));
        }
        world
    }

    /// Registers an extra dimension.
    pub fn add_dimension(&mut self, dimension: DimensionId) {
        self.dimensions.insert(dimension);
    }

    /// Adds an entity, registering its dimension if needed.
    pub fn spawn(&mut self, record: EntityRecord) -> EntityId {
        let id = self.store.allocate();
        self.dimensions.insert(record.dimension.clone());
        tracing::trace!(%id, entity_type = %record.entity_type, "spawned entity");
        self.entities.insert(id, record);
        id
    }

    /// Removes an entity entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or unknown.
    pub fn despawn(&mut self, id: EntityId) -> Result<()> {
        self.store.release(id)?;
        self.entities.remove(&id);
        Ok(())
    }

    /// Mutable access to an entity record.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or unknown.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut EntityRecord> {
        self.store.validate(id)?;
        self.entities
            .get_mut(&id)
            .ok_or_else(|| Error::entity_not_found(id))
    }

    /// Places a block, loading its position.
    pub fn set_block(&mut self, dimension: DimensionId, pos: BlockPos, block: Block) {
        self.dimensions.insert(dimension.clone());
        self.blocks.insert((dimension, pos), block);
    }

    /// Mutable access to the scoreboard.
    pub fn scoreboard_mut(&mut self) -> &mut Scoreboard {
        &mut self.scoreboard
    }

    /// The scoreboard.
    #[must_use]
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Makes the host refuse commands starting with `verb`.
    pub fn reject_command(&mut self, verb: impl Into<String>) {
        self.rejected_commands.insert(verb.into());
    }

    /// Commands accepted so far, oldest first.
    #[must_use]
    pub fn command_log(&self) -> Vec<SubmittedCommand> {
        self.command_log.iter().cloned().collect()
    }

    /// Number of tracked entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.store.len()
    }

    fn matching<'a>(
        &'a self,
        dimension: &'a DimensionId,
        query: &'a EntityQuery,
    ) -> impl Iterator<Item = (EntityId, &'a EntityRecord)> + 'a {
        self.entities.iter().filter_map(move |(id, record)| {
            (record.dimension == *dimension
                && query.matches(ScoreHolder::Entity(*id), record, &self.scoreboard))
            .then_some((*id, record))
        })
    }

    fn tagged_targets_exist(&self, command: &str) -> bool {
        command.match_indices("tag=").all(|(start, _)| {
            let tag: String = command[start + 4..]
                .chars()
                .take_while(|c| !matches!(c, ',' | ']' | ' '))
                .collect();
            self.entities.values().any(|record| record.tags.contains(&tag))
        })
    }
}

impl WorldAccess for World {
    fn dimensions(&self) -> Vec<DimensionId> {
        self.dimensions.iter().cloned().collect()
    }

    fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        self.store.validate(id).ok()?;
        self.entities.get(&id)
    }

    fn query_entities(&self, dimension: &DimensionId, query: &EntityQuery) -> Vec<EntityId> {
        self.matching(dimension, query)
            .filter(|(_, record)| record.alive)
            .map(|(id, _)| id)
            .collect()
    }

    fn query_players(&self, dimension: &DimensionId, query: &EntityQuery) -> Vec<EntityId> {
        self.matching(dimension, query)
            .filter(|(_, record)| record.is_player())
            .map(|(id, _)| id)
            .collect()
    }

    fn block(&self, dimension: &DimensionId, pos: BlockPos) -> Option<&Block> {
        self.blocks.get(&(dimension.clone(), pos))
    }

    fn score(&self, objective: &str, holder: &ScoreHolder) -> Option<i64> {
        self.scoreboard.get(objective, holder)
    }

    fn player_named(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, record)| record.is_player() && record.name.as_deref() == Some(name))
            .map(|(id, _)| *id)
    }
}

impl WorldMut for World {
    fn add_tag(&mut self, id: EntityId, tag: &str) -> Result<()> {
        self.entity_mut(id)?.tags.insert(tag.to_string());
        Ok(())
    }

    fn remove_tag(&mut self, id: EntityId, tag: &str) -> Result<()> {
        self.entity_mut(id)?.tags.remove(tag);
        Ok(())
    }

    fn submit_command(&mut self, source: &CommandSource, command: &str) -> Result<u32> {
        let trimmed = command.trim();
        let Some(verb) = trimmed.split_whitespace().next() else {
            return Err(Error::command_failed(command, "empty command"));
        };
        if let CommandSource::Entity(id) = source {
            self.store.validate(*id)?;
        }
        // the executed command may be wrapped in `execute ... run <cmd>`
        let run = trimmed
            .rsplit_once(" run ")
            .map_or(trimmed, |(_, tail)| tail.trim());
        let run_verb = run.split_whitespace().next().unwrap_or(verb);
        if self.rejected_commands.contains(verb) || self.rejected_commands.contains(run_verb) {
            return Err(Error::command_failed(command, format!("unknown command: {run_verb}")));
        }
        if !self.tagged_targets_exist(trimmed) {
            return Err(Error::command_failed(command, "no targets matched selector"));
        }
        self.command_log.push_back(SubmittedCommand {
            source: source.clone(),
            command: trimmed.to_string(),
        });
        Ok(1)
    }
}
