//! Text grammars for Voxecute.
//!
//! This crate provides:
//! - [`Scanner`] - Cursor-based scanning shared by every grammar
//! - [`PositionExpr`], [`RotationExpr`] - Absolute, relative and local coordinates
//! - [`Selector`] - Validated entity selectors built from a [`SelectorRegistry`]
//! - [`BlockPredicate`] - Block id and state tests
//! - [`ScoreAccess`], [`Relation`] - Score reads for score guards

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod block;
pub mod scanner;
pub mod score;
pub mod selector;
pub mod vector;

pub use block::BlockPredicate;
pub use scanner::{Lexicon, Number, Scanner};
pub use score::{HolderExpr, Relation, ScoreAccess, parse_range};
pub use selector::{
    Argument, ArgumentSpec, Duplication, Selector, SelectorParser, SelectorRegistry, SelectorType,
    Sort,
};
pub use vector::{Coord, CoordKind, PositionExpr, RotationExpr};
