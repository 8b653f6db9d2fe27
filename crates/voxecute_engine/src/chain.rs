//! Chains of subcommands and the builder that parses them.

use std::fmt;

use voxecute_foundation::{DimensionId, Result};
use voxecute_language::{
    BlockPredicate, Lexicon, PositionExpr, Relation, RotationExpr, ScoreAccess, Scanner, Selector,
    SelectorRegistry, parse_range,
};

use crate::context::Anchor;
use crate::guard::{Condition, Guard};
use crate::subcommand::{Axes, Fork, Redirect, Subcommand};

/// An immutable sequence of subcommands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chain {
    subcommands: Vec<Subcommand>,
}

impl Chain {
    /// Creates a chain from subcommands in order.
    #[must_use]
    pub fn new(subcommands: Vec<Subcommand>) -> Self {
        Self { subcommands }
    }

    /// The subcommand at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Subcommand> {
        self.subcommands.get(index)
    }

    /// Number of subcommands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subcommands.len()
    }

    /// True if the chain has no subcommands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subcommands.is_empty()
    }

    /// All subcommands in order.
    pub fn iter(&self) -> impl Iterator<Item = &Subcommand> {
        self.subcommands.iter()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sub) in self.subcommands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{sub}")?;
        }
        Ok(())
    }
}

/// Builds a [`Chain`] from text arguments.
///
/// Every text method parses its arguments immediately, so malformed or
/// invalid input fails at construction, before any context exists.
///
/// # Example
///
/// ```
/// use voxecute_engine::ChainBuilder;
/// use voxecute_language::SelectorRegistry;
///
/// let registry = SelectorRegistry::standard();
/// let chain = ChainBuilder::new(&registry)
///     .as_("@e[type=cow]")?
///     .at("@s")?
///     .positioned("~ ~1 ~")?
///     .build();
/// assert_eq!(chain.to_string(), "as @e[type=cow] at @s positioned ~ ~1 ~");
/// # Ok::<(), voxecute_foundation::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ChainBuilder<'r> {
    registry: &'r SelectorRegistry,
    subcommands: Vec<Subcommand>,
}

impl<'r> ChainBuilder<'r> {
    /// Starts an empty chain whose selectors use `registry`.
    #[must_use]
    pub fn new(registry: &'r SelectorRegistry) -> Self {
        Self {
            registry,
            subcommands: Vec::new(),
        }
    }

    /// Appends an already built subcommand.
    #[must_use]
    pub fn push(mut self, subcommand: impl Into<Subcommand>) -> Self {
        self.subcommands.push(subcommand.into());
        self
    }

    /// Finishes the chain.
    #[must_use]
    pub fn build(self) -> Chain {
        Chain::new(self.subcommands)
    }

    fn selector(&self, text: &str) -> Result<Selector> {
        Selector::parse(self.registry, text)
    }

    fn score(&self, holder: &str, objective: &str) -> Result<ScoreAccess> {
        ScoreAccess::parse(self.registry, holder, objective)
    }

    // =========================================================================
    // Forks
    // =========================================================================

    /// `as <selector>`
    ///
    /// # Errors
    ///
    /// Returns a parse or interpret error for an invalid selector.
    pub fn as_(self, selector: &str) -> Result<Self> {
        let selector = self.selector(selector)?;
        Ok(self.push(Fork::As(selector)))
    }

    /// `at <selector>`
    ///
    /// # Errors
    ///
    /// Returns a parse or interpret error for an invalid selector.
    pub fn at(self, selector: &str) -> Result<Self> {
        let selector = self.selector(selector)?;
        Ok(self.push(Fork::At(selector)))
    }

    /// `positioned as <selector>`
    ///
    /// # Errors
    ///
    /// Returns a parse or interpret error for an invalid selector.
    pub fn positioned_as(self, selector: &str) -> Result<Self> {
        let selector = self.selector(selector)?;
        Ok(self.push(Fork::PositionedAs(selector)))
    }

    /// `rotated as <selector>`
    ///
    /// # Errors
    ///
    /// Returns a parse or interpret error for an invalid selector.
    pub fn rotated_as(self, selector: &str) -> Result<Self> {
        let selector = self.selector(selector)?;
        Ok(self.push(Fork::RotatedAs(selector)))
    }

    /// `facing entity <selector> <anchor>`
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid selector or anchor.
    pub fn facing_entity(self, selector: &str, anchor: &str) -> Result<Self> {
        let selector = self.selector(selector)?;
        let anchor = Anchor::parse(anchor)?;
        Ok(self.push(Fork::FacingEntity(selector, anchor)))
    }

    // =========================================================================
    // Redirects
    // =========================================================================

    /// `positioned <x y z>`; integer x and z are block-centred.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed coordinates.
    pub fn positioned(self, position: &str) -> Result<Self> {
        let position = PositionExpr::parse_centered(position)?;
        Ok(self.push(Redirect::Positioned(position)))
    }

    /// `rotated <yaw pitch>`
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed or local rotations.
    pub fn rotated(self, rotation: &str) -> Result<Self> {
        let rotation = RotationExpr::parse(rotation)?;
        Ok(self.push(Redirect::Rotated(rotation)))
    }

    /// `facing <x y z>`
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed coordinates.
    pub fn facing(self, position: &str) -> Result<Self> {
        let position = PositionExpr::parse_centered(position)?;
        Ok(self.push(Redirect::Facing(position)))
    }

    /// `in <dimension>`; a bare name gets the `minecraft:` namespace.
    ///
    /// # Errors
    ///
    /// Returns a parse error unless `dimension` is a single word.
    pub fn in_dimension(self, dimension: &str) -> Result<Self> {
        let mut scanner = Scanner::new(dimension, Lexicon::DEFAULT);
        scanner.skip_whitespace();
        let name = scanner.scan_unquoted(&[])?;
        scanner.expect_end()?;
        Ok(self.push(Redirect::InDimension(DimensionId::new(name))))
    }

    /// `anchored feet|eyes`
    ///
    /// # Errors
    ///
    /// Returns a parse error for any other anchor.
    pub fn anchored(self, anchor: &str) -> Result<Self> {
        let anchor = Anchor::parse(anchor)?;
        Ok(self.push(Redirect::Anchored(anchor)))
    }

    /// `align <axes>`
    ///
    /// # Errors
    ///
    /// Returns a parse error for an empty, repeated or unknown axis.
    pub fn align(self, axes: &str) -> Result<Self> {
        let axes = Axes::parse(axes)?;
        Ok(self.push(Redirect::Align(axes)))
    }

    // =========================================================================
    // Guards
    // =========================================================================

    fn guard(self, negated: bool, condition: Condition) -> Self {
        self.push(Guard { condition, negated })
    }

    fn entity_condition(&self, selector: &str) -> Result<Condition> {
        Ok(Condition::Entity(self.selector(selector)?))
    }

    fn block_condition(position: &str, block: &str) -> Result<Condition> {
        Ok(Condition::Block(
            PositionExpr::parse(position)?,
            BlockPredicate::parse(block)?,
        ))
    }

    fn score_condition(
        &self,
        holder: &str,
        objective: &str,
        relation: &str,
        source: &str,
        source_objective: &str,
    ) -> Result<Condition> {
        Ok(Condition::Score(
            self.score(holder, objective)?,
            Relation::parse(relation)?,
            self.score(source, source_objective)?,
        ))
    }

    fn matches_condition(&self, holder: &str, objective: &str, range: &str) -> Result<Condition> {
        Ok(Condition::ScoreMatches(
            self.score(holder, objective)?,
            parse_range(range)?,
        ))
    }

    /// `if entity <selector>`
    ///
    /// # Errors
    ///
    /// Returns a parse or interpret error for an invalid selector.
    pub fn if_entity(self, selector: &str) -> Result<Self> {
        let condition = self.entity_condition(selector)?;
        Ok(self.guard(false, condition))
    }

    /// `unless entity <selector>`
    ///
    /// # Errors
    ///
    /// Returns a parse or interpret error for an invalid selector.
    pub fn unless_entity(self, selector: &str) -> Result<Self> {
        let condition = self.entity_condition(selector)?;
        Ok(self.guard(true, condition))
    }

    /// `if block <x y z> <block>`
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed coordinates or block text.
    pub fn if_block(self, position: &str, block: &str) -> Result<Self> {
        let condition = Self::block_condition(position, block)?;
        Ok(self.guard(false, condition))
    }

    /// `unless block <x y z> <block>`
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed coordinates or block text.
    pub fn unless_block(self, position: &str, block: &str) -> Result<Self> {
        let condition = Self::block_condition(position, block)?;
        Ok(self.guard(true, condition))
    }

    /// `if score <holder> <objective> <relation> <source> <objective>`
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid holder or relation.
    pub fn if_score(
        self,
        holder: &str,
        objective: &str,
        relation: &str,
        source: &str,
        source_objective: &str,
    ) -> Result<Self> {
        let condition = self.score_condition(holder, objective, relation, source, source_objective)?;
        Ok(self.guard(false, condition))
    }

    /// `unless score <holder> <objective> <relation> <source> <objective>`
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid holder or relation.
    pub fn unless_score(
        self,
        holder: &str,
        objective: &str,
        relation: &str,
        source: &str,
        source_objective: &str,
    ) -> Result<Self> {
        let condition = self.score_condition(holder, objective, relation, source, source_objective)?;
        Ok(self.guard(true, condition))
    }

    /// `if score <holder> <objective> matches <range>`
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid holder or range.
    pub fn if_score_matches(self, holder: &str, objective: &str, range: &str) -> Result<Self> {
        let condition = self.matches_condition(holder, objective, range)?;
        Ok(self.guard(false, condition))
    }

    /// `unless score <holder> <objective> matches <range>`
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid holder or range.
    pub fn unless_score_matches(self, holder: &str, objective: &str, range: &str) -> Result<Self> {
        let condition = self.matches_condition(holder, objective, range)?;
        Ok(self.guard(true, condition))
    }
}
