//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use voxecute_foundation::{EntityId, Error, ErrorContext, ErrorKind, InterpretError};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_parse_reports_window() {
    let err = Error::parse("expected `]`", 7, "@e[tag=", "");
    assert!(err.is_parse());
    assert!(!err.is_interpret());
    let msg = format!("{err}");
    assert!(msg.contains("at 7"));
    assert!(msg.contains("@e[tag=<-->"));
}

#[test]
fn error_interpret_wraps_kind() {
    let err = Error::interpret(InterpretError::Duplicated("c".into()));
    assert!(err.is_interpret());
    assert_eq!(err.as_interpret(), Some(&InterpretError::Duplicated("c".into())));
    assert!(format!("{err}").contains("`c` is duplicated"));
}

#[test]
fn error_notation() {
    let err = Error::invalid_notation("cannot mix local and world coordinates");
    assert!(err.is_notation());
    assert!(matches!(err.kind, ErrorKind::InvalidNotation(_)));
}

#[test]
fn error_entity_not_found() {
    let err = Error::entity_not_found(EntityId::new(42, 1));
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(id) if id.index == 42));
}

#[test]
fn error_command_failed_names_command() {
    let err = Error::command_failed("kill @s", "unknown command");
    let msg = format!("{err}");
    assert!(msg.contains("kill @s"));
    assert!(msg.contains("unknown command"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_display() {
    let ctx = ErrorContext::new().with_source("as @e").with_subcommand(2);
    assert_eq!(ctx.to_string(), "in `as @e` at subcommand 2");
    assert_eq!(ErrorContext::new().with_subcommand(0).to_string(), "at subcommand 0");
}

#[test]
fn with_context_attaches() {
    let err = Error::unknown_dimension("minecraft:moon").with_context(ErrorContext::new().with_subcommand(1));
    assert_eq!(err.context.and_then(|c| c.subcommand), Some(1));
}
