//! Execution contexts, subcommand chains, and evaluation for Voxecute.
//!
//! This crate provides:
//! - [`Context`] - The state one branch of a chain runs with
//! - [`SelectorResolver`] - Live selector resolution against a world
//! - [`Subcommand`] - Redirects, forks, and guards
//! - [`ChainBuilder`] - Parsing text arguments into a [`Chain`]
//! - [`Evaluator`] - Eager, depth-first evaluation and command submission
//! - [`ChainWalker`] - Lazy, step-wise evaluation
//! - [`CommandRenderer`] - Rendering final contexts as host commands

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod chain;
pub mod command;
pub mod config;
pub mod context;
pub mod eval;
pub mod guard;
pub mod query;
pub mod subcommand;
pub mod walker;

pub use chain::{Chain, ChainBuilder};
pub use command::CommandRenderer;
pub use config::ExecConfig;
pub use context::{Anchor, Context, Position, Sender};
pub use eval::Evaluator;
pub use guard::{Condition, Guard};
pub use query::SelectorResolver;
pub use subcommand::{Axes, Fork, Redirect, Subcommand};
pub use walker::{ChainWalker, Step, Steps};
