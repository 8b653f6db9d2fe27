//! Execution contexts.
//!
//! A [`Context`] is the state one branch of a chain runs with: who executes,
//! where, facing which way. Subcommands never mutate a context in place; they
//! clone it and change the clone, so sibling branches stay independent.

use std::fmt;
use std::rc::Rc;

use voxecute_foundation::{BlockPos, DimensionId, EntityId, Error, Result, Rotation, Vec3};
use voxecute_language::{Lexicon, Scanner};
use voxecute_storage::WorldAccess;

use crate::config::ExecConfig;

/// Who started a chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    /// An entity or player.
    Entity(EntityId),
    /// A command block.
    Block {
        /// Dimension the block is in.
        dimension: DimensionId,
        /// Block coordinates.
        position: BlockPos,
    },
    /// The server console.
    Server,
}

/// Which point of an entity a bound position refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The entity's location.
    #[default]
    Feet,
    /// The entity's head.
    Eyes,
}

impl Anchor {
    /// Parses `feet` or `eyes`.
    ///
    /// # Errors
    ///
    /// Returns a parse error for any other text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text, Lexicon::DEFAULT);
        let anchor = match scanner.consume_any(&["feet", "eyes"], true) {
            Some("feet") => Self::Feet,
            Some("eyes") => Self::Eyes,
            _ => return Err(scanner.error("expected `feet` or `eyes`")),
        };
        scanner.expect_end()?;
        Ok(anchor)
    }

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feet => "feet",
            Self::Eyes => "eyes",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a context is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// A fixed point.
    Explicit(Vec3),
    /// Wherever the entity is when the position is read.
    Bound(EntityId),
}

/// The state one branch runs with.
#[derive(Clone, Debug, PartialEq)]
pub struct Context {
    sender: Rc<Sender>,
    /// Entity running the branch, if any.
    pub executor: Option<EntityId>,
    /// Dimension of the position.
    pub dimension: DimensionId,
    /// Position, fixed or bound to an entity.
    pub position: Position,
    /// Facing.
    pub rotation: Rotation,
    /// Which point of a bound entity the position means.
    pub anchor: Anchor,
}

impl Context {
    /// Builds the root context for a sender.
    ///
    /// An entity sender executes at its own (bound) position with its own
    /// facing and dimension. A block sender sits at the block's centre. The
    /// server sits at the origin of the configured default dimension.
    ///
    /// # Errors
    ///
    /// Returns [`voxecute_foundation::ErrorKind::EntityNotFound`] if the
    /// sender entity does not exist.
    pub fn root<W: WorldAccess + ?Sized>(sender: Sender, world: &W, config: &ExecConfig) -> Result<Self> {
        let (executor, dimension, position, rotation) = match &sender {
            Sender::Entity(id) => {
                let record = world.entity(*id).ok_or_else(|| Error::entity_not_found(*id))?;
                (
                    Some(*id),
                    record.dimension.clone(),
                    Position::Bound(*id),
                    record.rotation,
                )
            }
            Sender::Block {
                dimension,
                position,
            } => (
                None,
                dimension.clone(),
                Position::Explicit(position.bottom_center() + Vec3::new(0.0, 0.5, 0.0)),
                Rotation::default(),
            ),
            Sender::Server => (
                None,
                config.default_dimension.clone(),
                Position::Explicit(Vec3::ZERO),
                Rotation::default(),
            ),
        };
        Ok(Self {
            sender: Rc::new(sender),
            executor,
            dimension,
            position,
            rotation,
            anchor: Anchor::Feet,
        })
    }

    /// The sender this context descends from.
    #[must_use]
    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    /// True if both contexts descend from the same root.
    #[must_use]
    pub fn shares_sender(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.sender, &other.sender)
    }

    /// The concrete position.
    ///
    /// Bound positions read the entity's current location, or its head when
    /// anchored at the eyes.
    ///
    /// # Errors
    ///
    /// Returns [`voxecute_foundation::ErrorKind::EntityNotFound`] if the
    /// bound entity no longer exists.
    pub fn resolve_position<W: WorldAccess + ?Sized>(&self, world: &W) -> Result<Vec3> {
        match self.position {
            Position::Explicit(v) => Ok(v),
            Position::Bound(id) => {
                let record = world.entity(id).ok_or_else(|| Error::entity_not_found(id))?;
                Ok(match self.anchor {
                    Anchor::Feet => record.location,
                    Anchor::Eyes => record.head_location(),
                })
            }
        }
    }
}
