//! Entity selectors: `@e[type=zombie,r=10]`, `@s`, or a bare player name.
//!
//! Parsing produces a [`Selector`], an immutable, validated description of
//! which entities to pick. Resolving it against a world happens in the engine.

mod parser;
pub mod registry;

use std::collections::BTreeMap;
use std::fmt;

use voxecute_foundation::{ArgValue, Result};

pub use parser::{SELECTOR_LEXICON, SelectorParser};
pub use registry::{
    ArgumentSpec, Duplication, PostFilter, SelectorRegistry, SelectorTraits, SelectorType, Sort,
    TypeRestriction,
};

/// One occurrence of an argument.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    /// Written as `key=!value`.
    pub inverted: bool,
    /// Parsed value.
    pub value: ArgValue,
}

/// A validated selector.
#[derive(Clone, Debug)]
pub struct Selector {
    selector_type: SelectorType,
    arguments: BTreeMap<String, Vec<Argument>>,
    single: bool,
}

impl Selector {
    /// Parses selector text against a registry.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed text and an interpretation error
    /// for unknown types or arguments, misplaced `!`, shape mismatches,
    /// duplicated arguments and `type=` on a fixed-type selector.
    pub fn parse(registry: &SelectorRegistry, text: &str) -> Result<Self> {
        SelectorParser::parse(registry, text)
    }

    pub(crate) fn new(selector_type: SelectorType, arguments: BTreeMap<String, Vec<Argument>>) -> Self {
        let count = arguments
            .get("c")
            .and_then(|occ| occ.first())
            .and_then(|arg| arg.value.as_int());
        let single = match count {
            Some(c) => c.unsigned_abs() == 1,
            None => selector_type.traits.default_limit == Some(1),
        };
        Self {
            selector_type,
            arguments,
            single,
        }
    }

    /// The selector type.
    #[must_use]
    pub fn selector_type(&self) -> &SelectorType {
        &self.selector_type
    }

    /// True if the selector can never yield more than one entity.
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.single
    }

    /// All occurrences of an argument, in written order.
    #[must_use]
    pub fn get(&self, name: &str) -> &[Argument] {
        self.arguments
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True if the argument occurs at all.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    /// Value of the first occurrence.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&ArgValue> {
        self.get(name).first().map(|a| &a.value)
    }

    /// Value of the first non-inverted occurrence.
    #[must_use]
    pub fn positive(&self, name: &str) -> Option<&ArgValue> {
        self.get(name).iter().find(|a| !a.inverted).map(|a| &a.value)
    }

    /// Values of every inverted occurrence.
    pub fn inverted(&self, name: &str) -> impl Iterator<Item = &ArgValue> {
        self.get(name).iter().filter(|a| a.inverted).map(|a| &a.value)
    }

    /// Every argument occurrence, grouped by key in key order.
    pub fn arguments(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.arguments
            .iter()
            .flat_map(|(k, occ)| occ.iter().map(move |a| (k.as_str(), a)))
    }

    /// The `c=` argument.
    #[must_use]
    pub fn count(&self) -> Option<i64> {
        self.first("c").and_then(ArgValue::as_int)
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.selector_type == other.selector_type && self.arguments == other.arguments
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.selector_type.is_name() {
            if let Some(name) = self.positive("name") {
                return write!(f, "{name}");
            }
        }
        write!(f, "@{}", self.selector_type.name)?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, (key, arg)) in self.arguments().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}=")?;
            if arg.inverted {
                f.write_str("!")?;
            }
            write!(f, "{}", arg.value)?;
        }
        f.write_str("]")
    }
}
