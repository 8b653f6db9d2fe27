//! Error types for the Voxecute system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! The taxonomy follows the life of a command chain:
//! - [`ErrorKind::Parse`] - malformed text, raised while building a chain
//! - [`ErrorKind::Interpret`] - well-formed but meaningless text, also raised while building
//! - [`ErrorKind::InvalidNotation`] - mixed local/world coordinates, raised while resolving
//! - [`ErrorKind::CommandFailed`] - the host rejected a submitted command

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Voxecute operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a parse error carrying a window of the surrounding text.
    #[must_use]
    pub fn parse(
        message: impl Into<String>,
        position: usize,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            position,
            before: before.into(),
            after: after.into(),
        })
    }

    /// Creates an interpretation error.
    #[must_use]
    pub fn interpret(error: InterpretError) -> Self {
        Self::new(ErrorKind::Interpret(error))
    }

    /// Creates an invalid coordinate notation error.
    #[must_use]
    pub fn invalid_notation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidNotation(message.into()))
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates an unknown dimension error.
    #[must_use]
    pub fn unknown_dimension(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDimension(name.into()))
    }

    /// Creates a command failure error.
    #[must_use]
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CommandFailed {
            command: command.into(),
            message: message.into(),
        })
    }

    /// Returns true if this is a parse error.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::Parse { .. })
    }

    /// Returns true if this is an interpretation error.
    #[must_use]
    pub fn is_interpret(&self) -> bool {
        matches!(self.kind, ErrorKind::Interpret(_))
    }

    /// Returns true if this is an invalid notation error.
    #[must_use]
    pub fn is_notation(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidNotation(_))
    }

    /// Returns the interpretation error, if this is one.
    #[must_use]
    pub fn as_interpret(&self) -> Option<&InterpretError> {
        match &self.kind {
            ErrorKind::Interpret(e) => Some(e),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Malformed text.
    #[error("parse error at {position}: {message} (near `{before}<-->{after}`)")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Byte offset of the cursor when the error was raised.
        position: usize,
        /// Up to eight characters before the cursor.
        before: String,
        /// Up to eight characters after the cursor.
        after: String,
    },

    /// Well-formed text that does not make sense.
    #[error("{0}")]
    Interpret(InterpretError),

    /// Local (`^`) and world coordinates were mixed.
    #[error("invalid notation: {0}")]
    InvalidNotation(String),

    /// Entity was not found in the world.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// Dimension is not known to the world.
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    /// The host rejected a submitted command.
    #[error("command `{command}` failed: {message}")]
    CommandFailed {
        /// The command text that was submitted.
        command: String,
        /// Why it failed.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Semantic problems found while interpreting parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    /// `@x` does not name a registered selector type.
    #[error("unknown selector type: @{0}")]
    UnknownSelectorType(String),

    /// The argument name is not registered.
    #[error("unknown selector argument: {0}")]
    UnknownArgument(String),

    /// `!` was used on an argument that cannot be inverted.
    #[error("selector argument `{0}` cannot be inverted")]
    NotInvertible(String),

    /// The argument occurred more often than its duplication rule allows.
    #[error("selector argument `{0}` is duplicated")]
    Duplicated(String),

    /// The value does not have the shape the argument expects.
    #[error("invalid value for selector argument `{argument}`: {value}")]
    ShapeMismatch {
        /// Argument name.
        argument: String,
        /// The offending value, serialized.
        value: String,
    },

    /// `type=` was given to a selector whose entity type is fixed.
    #[error("selector @{0} does not allow overriding its entity type")]
    TypeRestricted(String),

    /// A score holder selector may match more than one entity.
    #[error("score holder `{0}` must select a single entity")]
    AmbiguousHolder(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The text being processed.
    pub source: Option<String>,
    /// Index of the subcommand being applied.
    pub subcommand: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source text.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the subcommand index.
    #[must_use]
    pub fn with_subcommand(mut self, index: usize) -> Self {
        self.subcommand = Some(index);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in `{source}`")?;
        }
        if let Some(index) = self.subcommand {
            if self.source.is_some() {
                write!(f, " ")?;
            }
            write!(f, "at subcommand {index}")?;
        }
        Ok(())
    }
}
