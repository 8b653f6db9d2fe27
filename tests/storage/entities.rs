//! Integration tests for entity lifetimes
//!
//! Tests spawning, despawning, generational indices, and stale reference detection.

use voxecute_foundation::{ErrorKind, Vec3};
use voxecute_storage::{EntityRecord, World, WorldAccess};

// =============================================================================
// Spawning
// =============================================================================

#[test]
fn spawn_assigns_unique_ids() {
    let mut world = World::new();
    let a = world.spawn(EntityRecord::new("cow"));
    let b = world.spawn(EntityRecord::new("cow"));
    assert_ne!(a, b);
    assert_eq!(world.entity_count(), 2);
    assert_eq!(world.entity(a).unwrap().entity_type, "minecraft:cow");
}

#[test]
fn records_keep_their_builders() {
    let mut world = World::new();
    let id = world.spawn(
        EntityRecord::new("zombie")
            .named("Bob")
            .at(Vec3::new(1.0, 2.0, 3.0))
            .with_tag("boss")
            .with_family("monster"),
    );
    let record = world.entity(id).unwrap();
    assert_eq!(record.name.as_deref(), Some("Bob"));
    assert_eq!(record.location, Vec3::new(1.0, 2.0, 3.0));
    assert!(record.tags.contains("boss"));
    assert!(record.families.contains("monster"));
    assert!(record.alive);
    assert!(!record.is_player());
}

// =============================================================================
// Despawning
// =============================================================================

#[test]
fn despawned_ids_go_stale() {
    let mut world = World::new();
    let old = world.spawn(EntityRecord::new("cow"));
    world.despawn(old).unwrap();
    assert!(world.entity(old).is_none());

    let new = world.spawn(EntityRecord::new("pig"));
    assert_eq!(new.index, old.index);
    assert_ne!(new.generation, old.generation);
    assert!(world.entity(old).is_none());
    assert_eq!(world.entity(new).unwrap().entity_type, "minecraft:pig");

    let err = world.despawn(old).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleEntity(_)));
}

#[test]
fn mutation_of_missing_entities_fails() {
    let mut world = World::new();
    let id = world.spawn(EntityRecord::new("cow"));
    world.despawn(id).unwrap();
    assert!(world.entity_mut(id).is_err());
}
