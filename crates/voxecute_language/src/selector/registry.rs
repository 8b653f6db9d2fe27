//! Selector types and argument definitions.
//!
//! A [`SelectorRegistry`] is built once and passed to the parser. It answers
//! two questions: what does `@x` mean, and what may appear inside `[...]`.

use std::collections::HashMap;

use voxecute_foundation::{EntityId, Shape};
use voxecute_storage::PLAYER_TYPE;

// =============================================================================
// Selector types
// =============================================================================

/// Order in which resolved entities are returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sort {
    /// Ascending distance from the anchor position.
    Nearest,
    /// Shuffled with the evaluator's random source.
    Random,
}

/// An entity type a selector is limited to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeRestriction {
    /// Qualified entity type.
    pub entity_type: &'static str,
    /// When true, a `type=` argument replaces the restriction.
    pub overridable: bool,
}

/// Narrows the final candidate list given the current executor.
pub type PostFilter = fn(Vec<EntityId>, Option<EntityId>) -> Vec<EntityId>;

/// Keeps only the executor, if it is among the candidates.
#[must_use]
pub fn executor_only(candidates: Vec<EntityId>, executor: Option<EntityId>) -> Vec<EntityId> {
    executor
        .filter(|id| candidates.contains(id))
        .into_iter()
        .collect()
}

/// Behaviour attached to a selector type.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectorTraits {
    /// Entity type the results are limited to.
    pub type_restriction: Option<TypeRestriction>,
    /// Result count used when no `c=` argument is given.
    pub default_limit: Option<usize>,
    /// Applied after sorting, before the count limit.
    pub post_filter: Option<PostFilter>,
}

/// A selector type such as `@e`.
#[derive(Clone, Copy, Debug)]
pub struct SelectorType {
    /// Name after the `@`. Empty for the bare-name form.
    pub name: &'static str,
    /// When true only living entities are candidates.
    pub alive_only: bool,
    /// Result order.
    pub sort: Sort,
    /// Restriction, limit and post filter.
    pub traits: SelectorTraits,
}

impl SelectorType {
    /// Creates a type with no traits.
    #[must_use]
    pub const fn new(name: &'static str, sort: Sort) -> Self {
        Self {
            name,
            alive_only: false,
            sort,
            traits: SelectorTraits {
                type_restriction: None,
                default_limit: None,
                post_filter: None,
            },
        }
    }

    /// Only considers living entities.
    #[must_use]
    pub const fn alive_only(mut self) -> Self {
        self.alive_only = true;
        self
    }

    /// Restricts results to an entity type.
    #[must_use]
    pub const fn restricted_to(mut self, entity_type: &'static str, overridable: bool) -> Self {
        self.traits.type_restriction = Some(TypeRestriction {
            entity_type,
            overridable,
        });
        self
    }

    /// Sets the default result count.
    #[must_use]
    pub const fn with_default_limit(mut self, limit: usize) -> Self {
        self.traits.default_limit = Some(limit);
        self
    }

    /// Sets the post filter.
    #[must_use]
    pub const fn with_post_filter(mut self, filter: PostFilter) -> Self {
        self.traits.post_filter = Some(filter);
        self
    }

    /// True for the bare-name form.
    #[must_use]
    pub fn is_name(&self) -> bool {
        self.name.is_empty()
    }
}

impl PartialEq for SelectorType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

// =============================================================================
// Arguments
// =============================================================================

/// How often an argument may appear in one selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Duplication {
    /// At most once, inverted or not.
    Never,
    /// At most once without `!`; inverted occurrences are unlimited.
    InvertedOnly,
    /// Unlimited.
    Always,
}

/// Definition of one `key=value` argument.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentSpec {
    /// Argument key.
    pub name: &'static str,
    /// Shape the value must have.
    pub shape: Shape,
    /// Repetition rule.
    pub duplication: Duplication,
    /// Whether `key=!value` is accepted.
    pub invertible: bool,
}

impl ArgumentSpec {
    /// Creates a non-invertible argument that may appear once.
    #[must_use]
    pub fn new(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            duplication: Duplication::Never,
            invertible: false,
        }
    }

    /// Sets the repetition rule.
    #[must_use]
    pub fn duplication(mut self, duplication: Duplication) -> Self {
        self.duplication = duplication;
        self
    }

    /// Accepts `key=!value`.
    #[must_use]
    pub fn invertible(mut self) -> Self {
        self.invertible = true;
        self
    }
}

/// Accepted `m=` words.
pub const GAME_MODE_WORDS: &[&str] = &["survival", "s", "creative", "c", "adventure", "a", "spectator"];

/// Accepted numeric `m=` ids.
pub const GAME_MODE_IDS: &[i64] = &[0, 1, 2, 6];

/// Accepted `haspermission` states.
pub const PERMISSION_STATES: &[&str] = &["enabled", "disabled"];

fn hasitem_record() -> Shape {
    let count = Shape::union([Shape::Int, Shape::Range]);
    Shape::Record(vec![
        ("item", Shape::Text),
        ("location", Shape::Text),
        ("slot", count.clone()),
        ("quantity", count),
        ("data", Shape::Int),
    ])
}

// =============================================================================
// SelectorRegistry
// =============================================================================

/// Lookup table for selector types and arguments.
#[derive(Clone, Debug)]
pub struct SelectorRegistry {
    types: HashMap<&'static str, SelectorType>,
    arguments: HashMap<&'static str, ArgumentSpec>,
    name_type: SelectorType,
}

impl SelectorRegistry {
    /// Creates a registry with no `@` types or arguments.
    ///
    /// The bare-name form is always available and limited to one player.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
            arguments: HashMap::new(),
            name_type: SelectorType::new("", Sort::Nearest)
                .restricted_to(PLAYER_TYPE, false)
                .with_default_limit(1),
        }
    }

    /// The standard selector types (`@a @e @p @r @s`) and arguments.
    #[must_use]
    pub fn standard() -> Self {
        let number_or_relative = || Shape::union([Shape::Number, Shape::Relative]);

        let mut registry = Self::empty()
            .with_type(SelectorType::new("a", Sort::Nearest).restricted_to(PLAYER_TYPE, false))
            .with_type(SelectorType::new("e", Sort::Nearest).alive_only())
            .with_type(
                SelectorType::new("p", Sort::Nearest)
                    .restricted_to(PLAYER_TYPE, false)
                    .with_default_limit(1),
            )
            .with_type(
                SelectorType::new("r", Sort::Random)
                    .restricted_to(PLAYER_TYPE, true)
                    .with_default_limit(1),
            )
            .with_type(
                SelectorType::new("s", Sort::Nearest)
                    .with_post_filter(executor_only)
                    .with_default_limit(1),
            );

        for name in ["x", "y", "z"] {
            registry = registry.with_argument(ArgumentSpec::new(name, number_or_relative()));
        }
        for name in ["dx", "dy", "dz", "r", "rm", "rx", "rxm", "ry", "rym"] {
            registry = registry.with_argument(ArgumentSpec::new(name, Shape::Number));
        }
        for name in ["l", "lm", "c"] {
            registry = registry.with_argument(ArgumentSpec::new(name, Shape::Int));
        }
        for name in ["tag", "family", "type", "name"] {
            registry = registry.with_argument(
                ArgumentSpec::new(name, Shape::Text)
                    .duplication(Duplication::Always)
                    .invertible(),
            );
        }
        registry
            .with_argument(
                ArgumentSpec::new(
                    "m",
                    Shape::union([Shape::OneOf(GAME_MODE_WORDS), Shape::IntOneOf(GAME_MODE_IDS)]),
                )
                    .duplication(Duplication::InvertedOnly)
                    .invertible(),
            )
            .with_argument(ArgumentSpec::new(
                "scores",
                Shape::map_of(Shape::union([Shape::Int, Shape::Range])),
            ))
            .with_argument(ArgumentSpec::new(
                "haspermission",
                Shape::map_of(Shape::OneOf(PERMISSION_STATES)),
            ))
            .with_argument(ArgumentSpec::new(
                "hasitem",
                Shape::union([hasitem_record(), Shape::list_of(hasitem_record())]),
            ))
    }

    /// Adds or replaces a selector type.
    #[must_use]
    pub fn with_type(mut self, selector_type: SelectorType) -> Self {
        self.types.insert(selector_type.name, selector_type);
        self
    }

    /// Adds or replaces an argument.
    #[must_use]
    pub fn with_argument(mut self, spec: ArgumentSpec) -> Self {
        self.arguments.insert(spec.name, spec);
        self
    }

    /// Looks up `@name`.
    #[must_use]
    pub fn selector_type(&self, name: &str) -> Option<&SelectorType> {
        self.types.get(name)
    }

    /// The type used for bare player names.
    #[must_use]
    pub fn name_type(&self) -> &SelectorType {
        &self.name_type
    }

    /// Looks up an argument by key.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.get(name)
    }

    /// Registered `@` type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SelectorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
