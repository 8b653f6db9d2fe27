//! Host integration tests
//!
//! Tests the engine against a host other than the in-memory world, through
//! the `WorldAccess` and `WorldMut` traits alone.

use voxecute_engine::{ChainBuilder, Evaluator, Sender};
use voxecute_foundation::{BlockPos, DimensionId, EntityId, Result, Vec3};
use voxecute_language::SelectorRegistry;
use voxecute_storage::{
    Block, CommandSource, EntityQuery, EntityRecord, ScoreHolder, World, WorldAccess, WorldMut,
};

use crate::init_logging;

/// Forwards to a [`World`] and records every mutation.
#[derive(Default)]
struct RecordingHost {
    world: World,
    events: Vec<String>,
    /// Submitting a command with this verb despawns its source entity.
    lethal_verb: Option<&'static str>,
}

impl RecordingHost {
    fn new() -> Self {
        Self {
            world: World::new(),
            ..Self::default()
        }
    }
}

impl WorldAccess for RecordingHost {
    fn dimensions(&self) -> Vec<DimensionId> {
        self.world.dimensions()
    }

    fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        self.world.entity(id)
    }

    fn query_entities(&self, dimension: &DimensionId, query: &EntityQuery) -> Vec<EntityId> {
        self.world.query_entities(dimension, query)
    }

    fn query_players(&self, dimension: &DimensionId, query: &EntityQuery) -> Vec<EntityId> {
        self.world.query_players(dimension, query)
    }

    fn block(&self, dimension: &DimensionId, pos: BlockPos) -> Option<&Block> {
        self.world.block(dimension, pos)
    }

    fn score(&self, objective: &str, holder: &ScoreHolder) -> Option<i64> {
        self.world.score(objective, holder)
    }

    fn player_named(&self, name: &str) -> Option<EntityId> {
        self.world.player_named(name)
    }
}

impl WorldMut for RecordingHost {
    fn add_tag(&mut self, id: EntityId, tag: &str) -> Result<()> {
        self.events.push(format!("add {tag}"));
        self.world.add_tag(id, tag)
    }

    fn remove_tag(&mut self, id: EntityId, tag: &str) -> Result<()> {
        self.events.push(format!("remove {tag}"));
        self.world.remove_tag(id, tag)
    }

    fn submit_command(&mut self, source: &CommandSource, command: &str) -> Result<u32> {
        self.events.push(format!("submit {command}"));
        let count = self.world.submit_command(source, command)?;
        if let (Some(verb), CommandSource::Entity(id)) = (self.lethal_verb, source) {
            if command.contains(&format!(" run {verb}")) {
                self.world.despawn(*id)?;
            }
        }
        Ok(count)
    }
}

// =============================================================================
// Marker Lifecycle
// =============================================================================

#[test]
fn marker_tags_wrap_each_submission() {
    init_logging();
    let mut host = RecordingHost::new();
    host.world.spawn(EntityRecord::new("cow").at(Vec3::new(1.0, 64.0, 0.0)));
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry).as_("@e").unwrap().at("@s").unwrap().build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &host).unwrap();

    assert_eq!(evaluator.run_command(&chain, &mut host, &root, "say moo").unwrap(), 1);
    assert_eq!(
        host.events,
        vec![
            "add voxecute_marker_0".to_string(),
            "submit execute in minecraft:overworld rotated 0 0 \
             positioned as @e[tag=voxecute_marker_0,c=1] run say moo"
                .to_string(),
            "remove voxecute_marker_0".to_string(),
        ]
    );
}

#[test]
fn explicit_positions_never_touch_tags() {
    init_logging();
    let mut host = RecordingHost::new();
    host.world.spawn(EntityRecord::new("cow"));
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry)
        .as_("@e")
        .unwrap()
        .positioned("0 0 0")
        .unwrap()
        .build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &host).unwrap();
    evaluator.run_command(&chain, &mut host, &root, "say hi").unwrap();
    assert_eq!(host.events.len(), 1);
    assert!(host.events[0].starts_with("submit "));
}

#[test]
fn marker_removal_failure_is_reported_after_a_successful_submission() {
    init_logging();
    let mut host = RecordingHost {
        lethal_verb: Some("kill"),
        ..RecordingHost::new()
    };
    let cow = host.world.spawn(EntityRecord::new("cow"));
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry).as_("@e").unwrap().at("@s").unwrap().build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &host).unwrap();

    let err = evaluator.run_command(&chain, &mut host, &root, "kill @s").unwrap_err();
    assert!(host.entity(cow).is_none());
    assert_eq!(host.world.command_log().len(), 1);
    assert_eq!(host.events.last().map(String::as_str), Some("remove voxecute_marker_0"));
    assert!(!err.to_string().is_empty());
}
