//! Shape descriptors for argument validation.

use std::fmt;

use crate::value::ArgValue;

/// Structural description of the values an argument accepts.
///
/// Used by the selector grammar to validate each parsed value against the
/// declared shape of its argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Boolean literal.
    Bool,
    /// Number written as an integer.
    Int,
    /// Any number (integer or fractional).
    Number,
    /// Integer range or single integer.
    Range,
    /// `~`-relative number.
    Relative,
    /// Any string.
    Text,
    /// String from a fixed set of words.
    OneOf(&'static [&'static str]),
    /// Integer from a fixed set.
    IntOneOf(&'static [i64]),
    /// Any of the alternatives.
    Union(Vec<Shape>),
    /// Map whose entries may be inverted and whose values all match the shape.
    MapOf(Box<Shape>),
    /// Map with a fixed set of keys; entries may not be inverted.
    Record(Vec<(&'static str, Shape)>),
    /// List whose items all match the shape.
    ListOf(Box<Shape>),
    /// Anything.
    Any,
}

impl Shape {
    /// Creates a union shape.
    #[must_use]
    pub fn union(shapes: impl IntoIterator<Item = Shape>) -> Self {
        Self::Union(shapes.into_iter().collect())
    }

    /// Creates a map shape.
    #[must_use]
    pub fn map_of(value: Shape) -> Self {
        Self::MapOf(Box::new(value))
    }

    /// Creates a list shape.
    #[must_use]
    pub fn list_of(item: Shape) -> Self {
        Self::ListOf(Box::new(item))
    }

    /// Checks if a value matches this shape.
    #[must_use]
    pub fn matches(&self, value: &ArgValue) -> bool {
        match (self, value) {
            (Self::Any, _)
            | (Self::Bool, ArgValue::Bool(_))
            | (Self::Int | Self::Number | Self::Range, ArgValue::Int(_))
            | (Self::Number, ArgValue::Float(_))
            | (Self::Range, ArgValue::Range(_))
            | (Self::Relative, ArgValue::Relative(_))
            | (Self::Text, ArgValue::Text(_)) => true,
            (Self::OneOf(words), ArgValue::Text(s)) => words.contains(&s.as_str()),
            (Self::IntOneOf(ints), ArgValue::Int(n)) => ints.contains(n),
            (Self::Union(shapes), value) => shapes.iter().any(|s| s.matches(value)),
            (Self::MapOf(inner), ArgValue::Map(entries)) => {
                entries.iter().all(|e| inner.matches(&e.value))
            }
            (Self::Record(fields), ArgValue::Map(entries)) => entries.iter().all(|e| {
                !e.inverted
                    && fields
                        .iter()
                        .any(|(name, shape)| *name == e.key && shape.matches(&e.value))
            }),
            (Self::ListOf(inner), ArgValue::List(items)) => items.iter().all(|v| inner.matches(v)),
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Number => write!(f, "number"),
            Self::Range => write!(f, "range"),
            Self::Relative => write!(f, "relative"),
            Self::Text => write!(f, "text"),
            Self::OneOf(words) => write!(f, "one of {}", words.join("|")),
            Self::IntOneOf(ints) => {
                let ints: Vec<String> = ints.iter().map(ToString::to_string).collect();
                write!(f, "one of {}", ints.join("|"))
            }
            Self::Union(shapes) => {
                for (i, s) in shapes.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{s}")?;
                }
                Ok(())
            }
            Self::MapOf(v) => write!(f, "{{text={v}}}"),
            Self::Record(fields) => {
                write!(f, "{{")?;
                for (i, (name, shape)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{name}={shape}")?;
                }
                write!(f, "}}")
            }
            Self::ListOf(v) => write!(f, "[{v}]"),
            Self::Any => write!(f, "any"),
        }
    }
}
