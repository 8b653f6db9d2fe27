//! Integration tests for lazy chain walking
//!
//! Tests that `ChainWalker` agrees with eager evaluation, reports pruned
//! branches, and reads the world afresh on every pull.

use voxecute_engine::{ChainBuilder, Evaluator, Sender, Step};
use voxecute_foundation::{EntityId, Vec3};
use voxecute_language::SelectorRegistry;
use voxecute_storage::{EntityRecord, World, WorldMut};

fn spawn_line(world: &mut World, types: &[&str]) -> Vec<EntityId> {
    types
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            #[allow(clippy::cast_precision_loss)]
            let x = (i + 1) as f64;
            world.spawn(EntityRecord::new(ty).at(Vec3::new(x, 0.0, 0.0)))
        })
        .collect()
}

fn finals(steps: &[Step<'_>]) -> Vec<Option<EntityId>> {
    steps
        .iter()
        .filter(|s| s.is_final)
        .filter_map(|s| s.context.as_ref())
        .map(|c| c.executor)
        .collect()
}

// =============================================================================
// Agreement with eager evaluation
// =============================================================================

#[test]
fn final_steps_match_eager_run() {
    let mut world = World::new();
    spawn_line(&mut world, &["cow", "pig", "cow", "pig"]);
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry)
        .as_("@e")
        .unwrap()
        .at("@s")
        .unwrap()
        .if_entity("@e[type=pig,r=1.5]")
        .unwrap()
        .positioned("~ ~1 ~")
        .unwrap()
        .build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &world).unwrap();

    let mut walker = evaluator.walker(&chain, &root);
    let steps: Vec<Step<'_>> = walker.iter(&world).collect::<Result<_, _>>().unwrap();

    let mut eager = Vec::new();
    evaluator
        .run(&chain, &mut world, &root, |_, ctx| {
            eager.push(ctx.executor);
            Ok(())
        })
        .unwrap();
    assert_eq!(finals(&steps), eager);
    assert_eq!(eager.len(), 4);
}

#[test]
fn exactly_one_step_is_last() {
    let mut world = World::new();
    spawn_line(&mut world, &["cow", "cow", "cow"]);
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry)
        .as_("@e")
        .unwrap()
        .as_("@e[type=pig]")
        .unwrap()
        .build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &world).unwrap();
    let mut walker = evaluator.walker(&chain, &root);
    let steps: Vec<Step<'_>> = walker.iter(&world).collect::<Result<_, _>>().unwrap();

    assert_eq!(steps.len(), 6);
    assert_eq!(steps.iter().filter(|s| s.is_last).count(), 1);
    assert!(steps.last().is_some_and(|s| s.is_last && s.context.is_none()));
    assert!(finals(&steps).is_empty());
}

// =============================================================================
// Step contents
// =============================================================================

#[test]
fn steps_name_the_subcommand_that_produced_them() {
    let mut world = World::new();
    spawn_line(&mut world, &["cow"]);
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry)
        .as_("@e")
        .unwrap()
        .unless_entity("@s[type=cow]")
        .unwrap()
        .build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &world).unwrap();
    let mut walker = evaluator.walker(&chain, &root);

    let fork = walker.step(&world).unwrap().unwrap();
    assert_eq!(fork.index, 0);
    assert_eq!(fork.subcommand.map(ToString::to_string).as_deref(), Some("as @e"));
    assert!(!fork.is_final);

    let pruned = walker.step(&world).unwrap().unwrap();
    assert_eq!(pruned.index, 1);
    assert_eq!(
        pruned.subcommand.map(ToString::to_string).as_deref(),
        Some("unless entity @s[type=cow]")
    );
    assert!(pruned.context.is_none());
    assert!(pruned.is_final && pruned.is_last);
    assert!(walker.is_done());
}

// =============================================================================
// Live world
// =============================================================================

#[test]
fn caller_mutations_steer_later_branches() {
    let mut world = World::new();
    let cows = spawn_line(&mut world, &["cow", "cow"]);
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry)
        .as_("@e")
        .unwrap()
        .unless_entity("@s[tag=seen]")
        .unwrap()
        .build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &world).unwrap();
    let mut walker = evaluator.walker(&chain, &root);

    // Tag the second cow before its branch is reached.
    let first = walker.step(&world).unwrap().unwrap();
    assert_eq!(first.context.and_then(|c| c.executor), Some(cows[0]));
    world.add_tag(cows[1], "seen").unwrap();

    let mut kept = Vec::new();
    while let Some(step) = walker.step(&world) {
        let step = step.unwrap();
        if step.is_final {
            kept.push(step.context.map(|c| c.executor));
        }
    }
    assert_eq!(kept, vec![Some(Some(cows[0])), None]);
}

#[test]
fn dropping_a_walker_leaves_the_world_untouched() {
    let mut world = World::new();
    spawn_line(&mut world, &["cow", "cow"]);
    let registry = SelectorRegistry::standard();
    let chain = ChainBuilder::new(&registry).as_("@e").unwrap().build();
    let mut evaluator = Evaluator::default();
    let root = evaluator.root(Sender::Server, &world).unwrap();
    {
        let mut walker = evaluator.walker(&chain, &root);
        assert!(walker.step(&world).is_some());
    }
    assert_eq!(world.entity_count(), 2);
    assert!(world.command_log().is_empty());
}
