//! Core types, errors, vector math, and selector argument values for Voxecute.
//!
//! This crate provides:
//! - [`Error`] - The error taxonomy shared by every layer
//! - [`EntityId`] - Generational entity identifiers
//! - [`DimensionId`] - Dimension identifiers
//! - [`Vec3`], [`Rotation`], [`BlockPos`] - Spatial math
//! - [`ArgValue`] - Parsed selector argument values
//! - [`Shape`] - Structural shape checks for argument values

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dimension;
pub mod entity;
pub mod error;
pub mod math;
pub mod types;
pub mod value;

pub use dimension::DimensionId;
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, InterpretError, Result};
pub use math::{BlockPos, Rotation, Vec3};
pub use types::Shape;
pub use value::{ArgValue, IntRange, MapEntry, StateValue};
