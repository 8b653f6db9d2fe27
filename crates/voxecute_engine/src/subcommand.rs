//! Subcommands: the steps of a chain.
//!
//! Every subcommand maps one context to zero or more contexts:
//! - a [`Redirect`] always yields exactly one, changed in one respect;
//! - a [`Fork`] yields one per entity its selector picks;
//! - a [`Guard`] yields its input or nothing.

use std::fmt;

use rand_chacha::ChaCha8Rng;
use tracing::trace;
use voxecute_foundation::{DimensionId, EntityId, Error, Result};
use voxecute_language::{PositionExpr, RotationExpr, Selector};
use voxecute_storage::{EntityRecord, WorldAccess};

use crate::context::{Anchor, Context, Position};
use crate::guard::Guard;
use crate::query::SelectorResolver;

// =============================================================================
// Axes
// =============================================================================

/// A non-empty set of axes for `align`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Axes([bool; 3]);

impl Axes {
    /// Parses a combination such as `xz`, each axis at most once.
    ///
    /// # Errors
    ///
    /// Returns a parse error for repeated, unknown or missing axes.
    pub fn parse(text: &str) -> Result<Self> {
        let mut axes = [false; 3];
        let trimmed = text.trim();
        for c in trimmed.chars() {
            let axis = match c {
                'x' => 0,
                'y' => 1,
                'z' => 2,
                _ => return Err(Error::parse(format!("unknown axis `{c}`"), 0, "", trimmed)),
            };
            if axes[axis] {
                return Err(Error::parse(format!("axis `{c}` repeated"), 0, "", trimmed));
            }
            axes[axis] = true;
        }
        if !axes.contains(&true) {
            return Err(Error::parse("expected axes", 0, "", trimmed));
        }
        Ok(Self(axes))
    }

    /// True if `axis` (0 = x, 1 = y, 2 = z) is included.
    #[must_use]
    pub fn contains(self, axis: usize) -> bool {
        self.0.get(axis).copied().unwrap_or(false)
    }
}

impl fmt::Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in ["x", "y", "z"].iter().enumerate() {
            if self.0[i] {
                f.write_str(name)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Redirect
// =============================================================================

/// Changes one aspect of the context.
#[derive(Clone, Debug, PartialEq)]
pub enum Redirect {
    /// Moves to a position.
    Positioned(PositionExpr),
    /// Turns to a rotation.
    Rotated(RotationExpr),
    /// Switches dimension.
    InDimension(DimensionId),
    /// Switches between feet and eyes.
    Anchored(Anchor),
    /// Floors the chosen axes of the position.
    Align(Axes),
    /// Turns to look at a position.
    Facing(PositionExpr),
}

impl Redirect {
    fn apply<W: WorldAccess + ?Sized>(&self, ctx: &Context, world: &W) -> Result<Context> {
        let mut next = ctx.clone();
        match self {
            Self::Positioned(expr) => {
                let at = expr.resolve(ctx.resolve_position(world)?, ctx.rotation)?;
                next.position = Position::Explicit(at);
            }
            Self::Rotated(expr) => {
                next.rotation = expr.resolve(ctx.rotation)?;
            }
            Self::InDimension(dimension) => {
                if !world.dimensions().contains(dimension) {
                    return Err(Error::unknown_dimension(dimension.as_str()));
                }
                next.position = Position::Explicit(ctx.resolve_position(world)?);
                next.dimension = dimension.clone();
            }
            Self::Anchored(anchor) => {
                next.anchor = *anchor;
            }
            Self::Align(axes) => {
                let mut at = ctx.resolve_position(world)?;
                for axis in 0..3 {
                    if axes.contains(axis) {
                        at = at.with_axis(axis, at.axis(axis).floor());
                    }
                }
                next.position = Position::Explicit(at);
            }
            Self::Facing(expr) => {
                let origin = ctx.resolve_position(world)?;
                let target = expr.resolve(origin, ctx.rotation)?;
                next.rotation = origin.look_at(target);
            }
        }
        Ok(next)
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positioned(expr) => write!(f, "positioned {expr}"),
            Self::Rotated(expr) => write!(f, "rotated {expr}"),
            Self::InDimension(dimension) => write!(f, "in {dimension}"),
            Self::Anchored(anchor) => write!(f, "anchored {anchor}"),
            Self::Align(axes) => write!(f, "align {axes}"),
            Self::Facing(expr) => write!(f, "facing {expr}"),
        }
    }
}

// =============================================================================
// Fork
// =============================================================================

/// Produces one context per selected entity.
#[derive(Clone, Debug, PartialEq)]
pub enum Fork {
    /// Runs as each entity.
    As(Selector),
    /// Runs at each entity: its position, rotation and dimension.
    At(Selector),
    /// Runs at each entity's position.
    PositionedAs(Selector),
    /// Runs with each entity's rotation.
    RotatedAs(Selector),
    /// Turns to look at each entity's feet or eyes.
    FacingEntity(Selector, Anchor),
}

impl Fork {
    /// The selector this fork iterates.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        match self {
            Self::As(s) | Self::At(s) | Self::PositionedAs(s) | Self::RotatedAs(s) => s,
            Self::FacingEntity(s, _) => s,
        }
    }

    fn apply<W: WorldAccess + ?Sized>(
        &self,
        ctx: &Context,
        world: &W,
        rng: &mut ChaCha8Rng,
    ) -> Result<Vec<Context>> {
        let ids = SelectorResolver::resolve(self.selector(), ctx, world, rng)?;
        ids.into_iter()
            .map(|id| {
                let record = record(world, id)?;
                let mut next = ctx.clone();
                match self {
                    Self::As(_) => next.executor = Some(id),
                    Self::At(_) => {
                        next.position = Position::Bound(id);
                        next.rotation = record.rotation;
                        next.dimension = record.dimension.clone();
                    }
                    Self::PositionedAs(_) => next.position = Position::Bound(id),
                    Self::RotatedAs(_) => next.rotation = record.rotation,
                    Self::FacingEntity(_, anchor) => {
                        let target = match anchor {
                            Anchor::Feet => record.location,
                            Anchor::Eyes => record.head_location(),
                        };
                        next.rotation = ctx.resolve_position(world)?.look_at(target);
                    }
                }
                Ok(next)
            })
            .collect()
    }
}

fn record<W: WorldAccess + ?Sized>(world: &W, id: EntityId) -> Result<&EntityRecord> {
    world.entity(id).ok_or_else(|| Error::entity_not_found(id))
}

impl fmt::Display for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::As(s) => write!(f, "as {s}"),
            Self::At(s) => write!(f, "at {s}"),
            Self::PositionedAs(s) => write!(f, "positioned as {s}"),
            Self::RotatedAs(s) => write!(f, "rotated as {s}"),
            Self::FacingEntity(s, anchor) => write!(f, "facing entity {s} {anchor}"),
        }
    }
}

// =============================================================================
// Subcommand
// =============================================================================

/// One step of a chain.
#[derive(Clone, Debug, PartialEq)]
pub enum Subcommand {
    /// Exactly one result.
    Redirect(Redirect),
    /// One result per selected entity.
    Fork(Fork),
    /// The input or nothing.
    Guard(Guard),
}

impl Subcommand {
    /// Applies the step to one context.
    ///
    /// # Errors
    ///
    /// Returns an error for mixed coordinate notation, an unknown dimension,
    /// or a bound entity that no longer exists.
    pub fn apply<W: WorldAccess + ?Sized>(
        &self,
        ctx: &Context,
        world: &W,
        rng: &mut ChaCha8Rng,
    ) -> Result<Vec<Context>> {
        let out = match self {
            Self::Redirect(redirect) => vec![redirect.apply(ctx, world)?],
            Self::Fork(fork) => fork.apply(ctx, world, rng)?,
            Self::Guard(guard) => {
                if guard.test(ctx, world, rng)? {
                    vec![ctx.clone()]
                } else {
                    Vec::new()
                }
            }
        };
        trace!(subcommand = %self, results = out.len(), "applied subcommand");
        Ok(out)
    }

    /// True for forks.
    #[must_use]
    pub fn is_fork(&self) -> bool {
        matches!(self, Self::Fork(_))
    }

    /// True for steps that can yield nothing.
    #[must_use]
    pub fn can_prune(&self) -> bool {
        !matches!(self, Self::Redirect(_))
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redirect(r) => write!(f, "{r}"),
            Self::Fork(fork) => write!(f, "{fork}"),
            Self::Guard(g) => write!(f, "{g}"),
        }
    }
}

impl From<Redirect> for Subcommand {
    fn from(redirect: Redirect) -> Self {
        Self::Redirect(redirect)
    }
}

impl From<Fork> for Subcommand {
    fn from(fork: Fork) -> Self {
        Self::Fork(fork)
    }
}

impl From<Guard> for Subcommand {
    fn from(guard: Guard) -> Self {
        Self::Guard(guard)
    }
}
