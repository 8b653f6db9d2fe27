//! Voxecute - execute-style command chains over a voxel world
//!
//! This crate re-exports all layers of the Voxecute system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: voxecute_engine     — Contexts, subcommands, selector resolution, evaluation
//! Layer 2: voxecute_language   — Scanner, coordinates, selectors, block and score grammar
//! Layer 1: voxecute_storage    — World capabilities, in-memory world, scoreboard
//! Layer 0: voxecute_foundation — Core types (Error, EntityId, Vec3, ArgValue)
//! ```

pub use voxecute_engine as engine;
pub use voxecute_foundation as foundation;
pub use voxecute_language as language;
pub use voxecute_storage as storage;
