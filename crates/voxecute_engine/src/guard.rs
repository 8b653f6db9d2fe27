//! Guards: `if` / `unless` conditions.
//!
//! A guard passes its context through unchanged when its condition holds
//! (or does not hold, when negated) and drops it otherwise. Conditions that
//! cannot be decided, such as an unloaded block or a missing score, are false.

use std::fmt;

use rand_chacha::ChaCha8Rng;
use voxecute_foundation::{BlockPos, IntRange, Result};
use voxecute_language::{BlockPredicate, HolderExpr, PositionExpr, Relation, ScoreAccess, Selector};
use voxecute_storage::{ScoreHolder, WorldAccess};

use crate::context::Context;
use crate::query::SelectorResolver;

/// What a guard tests.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// The selector picks at least one entity.
    Entity(Selector),
    /// The block at a position matches.
    Block(PositionExpr, BlockPredicate),
    /// Two scores compare.
    Score(ScoreAccess, Relation, ScoreAccess),
    /// A score lies in a range.
    ScoreMatches(ScoreAccess, IntRange),
}

/// A condition, optionally negated.
#[derive(Clone, Debug, PartialEq)]
pub struct Guard {
    /// The test.
    pub condition: Condition,
    /// Written as `unless`.
    pub negated: bool,
}

impl Guard {
    /// An `if` guard.
    #[must_use]
    pub fn when(condition: Condition) -> Self {
        Self {
            condition,
            negated: false,
        }
    }

    /// An `unless` guard.
    #[must_use]
    pub fn unless(condition: Condition) -> Self {
        Self {
            condition,
            negated: true,
        }
    }

    /// Whether `ctx` survives.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed notation or a context whose bound
    /// entity is gone; undecidable conditions are false.
    pub fn test<W: WorldAccess + ?Sized>(
        &self,
        ctx: &Context,
        world: &W,
        rng: &mut ChaCha8Rng,
    ) -> Result<bool> {
        Ok(self.condition.holds(ctx, world, rng)? != self.negated)
    }
}

impl Condition {
    /// Evaluates the condition without negation.
    ///
    /// # Errors
    ///
    /// See [`Guard::test`].
    pub fn holds<W: WorldAccess + ?Sized>(
        &self,
        ctx: &Context,
        world: &W,
        rng: &mut ChaCha8Rng,
    ) -> Result<bool> {
        match self {
            Self::Entity(selector) => {
                Ok(!SelectorResolver::resolve(selector, ctx, world, rng)?.is_empty())
            }
            Self::Block(position, predicate) => {
                let at = position.resolve(ctx.resolve_position(world)?, ctx.rotation)?;
                Ok(world
                    .block(&ctx.dimension, BlockPos::containing(at))
                    .is_some_and(|block| predicate.matches(block)))
            }
            Self::Score(left, relation, right) => {
                let left = score_of(left, ctx, world, rng)?;
                let right = score_of(right, ctx, world, rng)?;
                Ok(match (left, right) {
                    (Some(l), Some(r)) => relation.holds(l, r),
                    _ => false,
                })
            }
            Self::ScoreMatches(access, range) => {
                Ok(score_of(access, ctx, world, rng)?.is_some_and(|s| range.contains(s)))
            }
        }
    }
}

fn score_of<W: WorldAccess + ?Sized>(
    access: &ScoreAccess,
    ctx: &Context,
    world: &W,
    rng: &mut ChaCha8Rng,
) -> Result<Option<i64>> {
    let holder = match &access.holder {
        HolderExpr::Selector(selector) => SelectorResolver::resolve(selector, ctx, world, rng)?
            .first()
            .copied()
            .map(ScoreHolder::Entity),
        HolderExpr::Name(name) => Some(
            world
                .player_named(name)
                .map_or_else(|| ScoreHolder::Fake(name.clone()), ScoreHolder::Entity),
        ),
    };
    Ok(holder.and_then(|h| world.score(&access.objective, &h)))
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.negated { "unless " } else { "if " })?;
        match &self.condition {
            Condition::Entity(selector) => write!(f, "entity {selector}"),
            Condition::Block(position, predicate) => write!(f, "block {position} {predicate}"),
            Condition::Score(left, relation, right) => write!(f, "score {left} {relation} {right}"),
            Condition::ScoreMatches(access, range) => write!(f, "score {access} matches {range}"),
        }
    }
}
