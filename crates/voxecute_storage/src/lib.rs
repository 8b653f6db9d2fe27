//! Host world capabilities and an in-memory voxel world for Voxecute.
//!
//! This crate provides:
//! - [`WorldAccess`] / [`WorldMut`] - The capabilities the engine calls into
//! - [`World`] - In-memory world state with structural sharing
//! - [`EntityQuery`] - Filters the host evaluates while gathering entities
//! - [`Scoreboard`] - Objectives and scores
//! - [`Block`] - Placed blocks and their states

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod block;
pub mod entity;
pub mod player;
pub mod query;
pub mod scoreboard;
pub mod world;

pub use block::Block;
pub use entity::{EntityRecord, EntityStore, PLAYER_TYPE, qualify_type};
pub use player::{GameMode, PlayerState};
pub use query::{EntityQuery, ScoreFilter};
pub use scoreboard::{Objective, ScoreHolder, Scoreboard};
pub use world::{CommandSource, SubmittedCommand, World, WorldAccess, WorldMut};
