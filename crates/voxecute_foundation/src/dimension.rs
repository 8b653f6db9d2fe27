//! Dimension identifiers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Namespaced identifier of a dimension, e.g. `minecraft:overworld`.
///
/// Bare names are normalized into the `minecraft` namespace so
/// `overworld` and `minecraft:overworld` compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionId(String);

impl DimensionId {
    /// The overworld.
    pub const OVERWORLD: &'static str = "minecraft:overworld";
    /// The nether.
    pub const NETHER: &'static str = "minecraft:nether";
    /// The end.
    pub const THE_END: &'static str = "minecraft:the_end";

    /// Creates a dimension id, adding the default namespace when missing.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if name.contains(':') {
            Self(name.to_string())
        } else {
            Self(format!("minecraft:{name}"))
        }
    }

    /// Returns the overworld id.
    #[must_use]
    pub fn overworld() -> Self {
        Self(Self::OVERWORLD.to_string())
    }

    /// Returns the namespaced id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DimensionId {
    fn default() -> Self {
        Self::overworld()
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
