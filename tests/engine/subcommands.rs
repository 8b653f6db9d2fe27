//! Integration tests for individual subcommands
//!
//! Tests that each redirect, fork, and guard maps one context to the
//! expected contexts without touching its input.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use voxecute_engine::{
    Anchor, Axes, Condition, Context, ExecConfig, Fork, Guard, Position, Redirect, Sender, Subcommand,
};
use voxecute_foundation::{BlockPos, DimensionId, Rotation, Vec3};
use voxecute_language::{BlockPredicate, PositionExpr, RotationExpr, Selector, SelectorRegistry};
use voxecute_storage::{Block, EntityRecord, World};

fn apply(sub: &Subcommand, ctx: &Context, world: &World) -> Vec<Context> {
    sub.apply(ctx, world, &mut ChaCha8Rng::seed_from_u64(0)).unwrap()
}

fn selector(text: &str) -> Selector {
    Selector::parse(&SelectorRegistry::standard(), text).unwrap()
}

fn close(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-9
}

// =============================================================================
// Redirects
// =============================================================================

#[test]
fn redirects_yield_exactly_one_context() {
    let mut world = World::new();
    let cow = world.spawn(EntityRecord::new("cow").at(Vec3::new(4.0, 70.0, 4.0)));
    let ctx = Context::root(Sender::Entity(cow), &world, &ExecConfig::default()).unwrap();
    let redirects = [
        Redirect::Positioned(PositionExpr::parse("~ ~1 ~").unwrap()),
        Redirect::Rotated(RotationExpr::parse("45 0").unwrap()),
        Redirect::InDimension(DimensionId::new("the_end")),
        Redirect::Anchored(Anchor::Eyes),
        Redirect::Align(Axes::parse("y").unwrap()),
        Redirect::Facing(PositionExpr::parse("0 0 0").unwrap()),
    ];
    for redirect in redirects {
        let sub = Subcommand::Redirect(redirect);
        let out = apply(&sub, &ctx, &world);
        assert_eq!(out.len(), 1, "{sub}");
        assert!(out[0].shares_sender(&ctx));
        assert_eq!(out[0].executor, Some(cow));
    }
    assert_eq!(ctx.position, Position::Bound(cow));
}

#[test]
fn positioned_relative_to_a_bound_entity_detaches() {
    let mut world = World::new();
    let cow = world.spawn(EntityRecord::new("cow").at(Vec3::new(4.0, 70.0, 4.0)));
    let ctx = Context::root(Sender::Entity(cow), &world, &ExecConfig::default()).unwrap();
    let sub = Subcommand::Redirect(Redirect::Positioned(PositionExpr::parse("~ ~1 ~").unwrap()));
    let out = apply(&sub, &ctx, &world).remove(0);
    assert_eq!(out.position, Position::Explicit(Vec3::new(4.0, 71.0, 4.0)));

    world.entity_mut(cow).unwrap().location = Vec3::ZERO;
    assert_eq!(out.resolve_position(&world).unwrap(), Vec3::new(4.0, 71.0, 4.0));
}

#[test]
fn anchored_eyes_then_local_offset() {
    let mut world = World::new();
    let cow = world.spawn(
        EntityRecord::new("cow")
            .at(Vec3::new(0.0, 64.0, 0.0))
            .with_eye_height(1.5)
            .facing(Rotation::new(0.0, 0.0)),
    );
    let ctx = Context::root(Sender::Entity(cow), &world, &ExecConfig::default()).unwrap();
    let eyes = apply(&Subcommand::Redirect(Redirect::Anchored(Anchor::Eyes)), &ctx, &world).remove(0);
    let ahead = Subcommand::Redirect(Redirect::Positioned(PositionExpr::parse("^ ^ ^1").unwrap()));
    let out = apply(&ahead, &eyes, &world).remove(0);
    assert!(close(out.resolve_position(&world).unwrap(), Vec3::new(0.0, 65.5, 1.0)));
}

#[test]
fn unknown_dimensions_are_errors() {
    let world = World::new();
    let ctx = Context::root(Sender::Server, &world, &ExecConfig::default()).unwrap();
    let sub = Subcommand::Redirect(Redirect::InDimension(DimensionId::new("aether")));
    assert!(sub.apply(&ctx, &world, &mut ChaCha8Rng::seed_from_u64(0)).is_err());
}

// =============================================================================
// Forks
// =============================================================================

#[test]
fn at_copies_placement_not_executor() {
    let mut world = World::new();
    let pig = world.spawn(
        EntityRecord::new("pig")
            .at(Vec3::new(1.0, 2.0, 3.0))
            .facing(Rotation::new(-90.0, 15.0))
            .in_dimension(DimensionId::new("nether")),
    );
    let ctx = Context::root(Sender::Server, &world, &ExecConfig::default()).unwrap();
    let out = apply(&Subcommand::Fork(Fork::At(selector("@e[type=pig]"))), &ctx, &world);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].position, Position::Bound(pig));
    assert_eq!(out[0].rotation, Rotation::new(-90.0, 15.0));
    assert_eq!(out[0].dimension, DimensionId::new("nether"));
    assert_eq!(out[0].executor, None);
}

#[test]
fn positioned_as_and_rotated_as_change_one_aspect() {
    let mut world = World::new();
    let pig = world.spawn(EntityRecord::new("pig").facing(Rotation::new(30.0, 0.0)));
    let ctx = Context::root(Sender::Server, &world, &ExecConfig::default()).unwrap();

    let moved = apply(&Subcommand::Fork(Fork::PositionedAs(selector("@e"))), &ctx, &world).remove(0);
    assert_eq!(moved.position, Position::Bound(pig));
    assert_eq!(moved.rotation, ctx.rotation);

    let turned = apply(&Subcommand::Fork(Fork::RotatedAs(selector("@e"))), &ctx, &world).remove(0);
    assert_eq!(turned.position, ctx.position);
    assert_eq!(turned.rotation, Rotation::new(30.0, 0.0));
}

#[test]
fn forks_over_nothing_yield_nothing() {
    let world = World::new();
    let ctx = Context::root(Sender::Server, &world, &ExecConfig::default()).unwrap();
    for fork in [
        Fork::As(selector("@e")),
        Fork::At(selector("@a")),
        Fork::FacingEntity(selector("@e"), Anchor::Eyes),
    ] {
        assert!(apply(&Subcommand::Fork(fork), &ctx, &world).is_empty());
    }
}

// =============================================================================
// Guards
// =============================================================================

#[test]
fn guards_pass_or_drop_the_same_context() {
    let mut world = World::new();
    world.set_block(DimensionId::overworld(), BlockPos::new(0, -1, 0), Block::new("grass_block"));
    let ctx = Context::root(Sender::Server, &world, &ExecConfig::default()).unwrap();
    let condition = Condition::Block(
        PositionExpr::parse("~ ~-1 ~").unwrap(),
        BlockPredicate::parse("grass_block").unwrap(),
    );

    let kept = apply(&Subcommand::Guard(Guard::when(condition.clone())), &ctx, &world);
    assert_eq!(kept, vec![ctx.clone()]);
    assert!(apply(&Subcommand::Guard(Guard::unless(condition)), &ctx, &world).is_empty());
}
