//! Integration tests for command rendering and submission
//!
//! Tests the text handed to the host for explicit and bound positions,
//! transient marker handling, and configured prefixes.

use voxecute_engine::{ChainBuilder, CommandRenderer, Evaluator, ExecConfig, Sender};
use voxecute_foundation::{BlockPos, DimensionId, Vec3};
use voxecute_language::SelectorRegistry;
use voxecute_storage::{CommandSource, EntityRecord, World, WorldAccess};

fn cow_at(world: &mut World, x: f64) -> voxecute_foundation::EntityId {
    world.spawn(EntityRecord::new("cow").at(Vec3::new(x, 64.0, 0.0)))
}

// =============================================================================
// Explicit Positions
// =============================================================================

#[test]
fn explicit_branches_render_coordinates() {
    let mut world = World::new();
    let cow = cow_at(&mut world, 2.0);
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry)
        .as_("@e")
        .unwrap()
        .at("@s")
        .unwrap()
        .positioned("~ ~1 ~")
        .unwrap()
        .in_dimension("the_end")
        .unwrap()
        .build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &world).unwrap();
    assert_eq!(evaluator.run_command(&chain, &mut world, &root, "say moo").unwrap(), 1);

    let log = world.command_log();
    assert_eq!(log[0].source, CommandSource::Entity(cow));
    assert_eq!(
        log[0].command,
        "execute in minecraft:the_end rotated 0 0 positioned 2 65 0 run say moo"
    );
}

#[test]
fn block_senders_start_at_the_block_centre() {
    let mut world = World::new();
    let sender = Sender::Block {
        dimension: DimensionId::overworld(),
        position: BlockPos::new(1, 64, 2),
    };
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(sender, &world).unwrap();
    let text = CommandRenderer::new(evaluator.config())
        .render(&root, &world, "say tick")
        .unwrap();
    assert_eq!(
        text,
        "execute in minecraft:overworld rotated 0 0 positioned 1.5 64.5 2.5 run say tick"
    );

    let chain = ChainBuilder::new(&SelectorRegistry::standard()).build();
    evaluator.run_command(&chain, &mut world, &root, "say tick").unwrap();
    assert_eq!(world.command_log()[0].source, CommandSource::Dimension(DimensionId::overworld()));
}

// =============================================================================
// Bound Positions
// =============================================================================

#[test]
fn each_bound_branch_gets_a_fresh_marker() {
    let mut world = World::new();
    let cows = [cow_at(&mut world, 1.0), cow_at(&mut world, 2.0)];
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry).at("@e").unwrap().build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &world).unwrap();
    assert_eq!(evaluator.run_command(&chain, &mut world, &root, "say hi").unwrap(), 2);
    assert_eq!(evaluator.run_command(&chain, &mut world, &root, "say hi").unwrap(), 2);

    let commands: Vec<String> = world.command_log().into_iter().map(|c| c.command).collect();
    for (i, command) in commands.iter().enumerate() {
        assert!(command.contains(&format!("positioned as @e[tag=voxecute_marker_{i},c=1] run say hi")));
    }
    for cow in cows {
        assert!(world.entity(cow).unwrap().tags.is_empty());
    }
}

#[test]
fn configured_prefixes_are_used() {
    let mut world = World::new();
    let cow = cow_at(&mut world, 0.0);
    let config = ExecConfig::default()
        .with_command_prefix("minecraft:execute")
        .with_marker_prefix("mark_");
    let mut evaluator = Evaluator::new(config);
    let root = evaluator.root(Sender::Entity(cow), &world).unwrap();
    let chain = ChainBuilder::new(&SelectorRegistry::standard())
        .anchored("eyes")
        .unwrap()
        .build();
    evaluator.run_command(&chain, &mut world, &root, "say hi").unwrap();
    assert_eq!(
        world.command_log()[0].command,
        "minecraft:execute in minecraft:overworld rotated 0 0 positioned as @e[tag=mark_0,c=1] \
         anchored eyes positioned ^ ^ ^ run say hi"
    );
}

#[test]
fn rejected_commands_stop_the_run_and_clean_up() {
    let mut world = World::new();
    world.reject_command("kill");
    let cows = [cow_at(&mut world, 1.0), cow_at(&mut world, 2.0)];
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry).at("@e").unwrap().build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &world).unwrap();

    let err = evaluator.run_command(&chain, &mut world, &root, "kill @s").unwrap_err();
    assert!(err.to_string().contains("unknown command: kill"));
    assert!(world.command_log().is_empty());
    for cow in cows {
        assert!(world.entity(cow).unwrap().tags.is_empty());
    }
}
