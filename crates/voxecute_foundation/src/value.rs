//! Parsed argument values.
//!
//! [`ArgValue`] is what the selector grammar produces for the right-hand side
//! of `key=value`. Its `Display` implementation writes selector text back out,
//! so any value can be shown in an error message or re-parsed.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An inclusive integer range with optional open ends (`1..5`, `..5`, `1..`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntRange {
    /// Lower bound, inclusive.
    pub min: Option<i64>,
    /// Upper bound, inclusive.
    pub max: Option<i64>,
}

impl IntRange {
    /// Creates a range from optional bounds.
    #[must_use]
    pub const fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// A range matching exactly one value.
    #[must_use]
    pub const fn exactly(value: i64) -> Self {
        Self::new(Some(value), Some(value))
    }

    /// Returns true if `value` lies inside the range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = self.min {
            write!(f, "{min}")?;
        }
        f.write_str("..")?;
        if let Some(max) = self.max {
            write!(f, "{max}")?;
        }
        Ok(())
    }
}

/// One `key=value` or `key=!value` entry of a `{...}` map value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapEntry {
    /// Entry key.
    pub key: String,
    /// Whether the value was written with `!`.
    pub inverted: bool,
    /// Entry value.
    pub value: ArgValue,
}

impl MapEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(key: impl Into<String>, inverted: bool, value: ArgValue) -> Self {
        Self {
            key: key.into(),
            inverted,
            value,
        }
    }
}

/// A selector argument value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArgValue {
    /// `true` / `false`.
    Bool(bool),
    /// A number written without a fractional part.
    Int(i64),
    /// A number written with a fractional part.
    Float(f64),
    /// An integer range.
    Range(IntRange),
    /// `~` followed by an optional number.
    Relative(f64),
    /// A bare or quoted string.
    Text(String),
    /// `{key=value,...}`; keys may repeat and keep their order.
    Map(Vec<MapEntry>),
    /// `[value,...]`.
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Range(_) => "range",
            Self::Relative(_) => "relative",
            Self::Text(_) => "text",
            Self::Map(_) => "map",
            Self::List(_) => "list",
        }
    }

    /// Numeric value of `Int` and `Float`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Integer value of `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Text of `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// An `Int` or `Range` value as a range.
    #[must_use]
    pub fn as_range(&self) -> Option<IntRange> {
        match self {
            Self::Int(n) => Some(IntRange::exactly(*n)),
            Self::Range(r) => Some(*r),
            _ => None,
        }
    }
}

/// Characters that force a string to be quoted when written back out.
const QUOTE_TRIGGERS: &[char] = &[
    ',', '=', '{', '}', '[', ']', '!', '"', '\'', '~', '^', '@', '\\',
];

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s == "true"
        || s == "false"
        || s.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
        || s.chars().any(|c| c.is_whitespace() || QUOTE_TRIGGERS.contains(&c))
}

/// Writes a string in selector syntax, quoting it when a bare form would not re-parse.
pub(crate) fn write_text(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if !needs_quotes(s) {
        return f.write_str(s);
    }
    f.write_str("\"")?;
    for c in s.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{n:.1}")
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write_float(f, *n),
            Self::Range(r) => write!(f, "{r}"),
            Self::Relative(n) => {
                f.write_str("~")?;
                if *n != 0.0 {
                    write_float(f, *n)?;
                }
                Ok(())
            }
            Self::Text(s) => write_text(f, s),
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_text(f, &entry.key)?;
                    f.write_str("=")?;
                    if entry.inverted {
                        f.write_str("!")?;
                    }
                    write!(f, "{}", entry.value)?;
                }
                f.write_str("}")
            }
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A block state value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StateValue {
    /// Boolean state.
    Bool(bool),
    /// Integer state.
    Int(i64),
    /// Enumerated state.
    Text(String),
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}
