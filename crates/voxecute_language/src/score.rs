//! Score access for `if score` guards.

use std::fmt;

use voxecute_foundation::{Error, IntRange, InterpretError, Result};

use crate::scanner::{Lexicon, Scanner};
use crate::selector::{Selector, SelectorRegistry};

const SCORE_LEXICON: Lexicon = Lexicon {
    whitespace: &[' ', '\t'],
    quotes: &['"'],
    true_words: &[],
    false_words: &[],
    symbols: &['"', '\\'],
};

/// Whose score is read.
#[derive(Clone, Debug, PartialEq)]
pub enum HolderExpr {
    /// The single entity a selector picks.
    Selector(Selector),
    /// A name: a player's name or a fake holder such as `#global`.
    Name(String),
}

impl fmt::Display for HolderExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(selector) => write!(f, "{selector}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// A holder plus an objective.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreAccess {
    /// Whose score.
    pub holder: HolderExpr,
    /// Which objective.
    pub objective: String,
}

impl ScoreAccess {
    /// Parses a holder and an objective.
    ///
    /// Holders starting with `@` are selectors and must pick at most one
    /// entity. Other holders are names; `*` is not accepted.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed text, or
    /// [`InterpretError::AmbiguousHolder`] for a selector that may pick more
    /// than one entity.
    pub fn parse(registry: &SelectorRegistry, holder: &str, objective: &str) -> Result<Self> {
        let holder_text = holder.trim();
        let holder = if holder_text.starts_with('@') {
            let selector = Selector::parse(registry, holder_text)?;
            if !selector.is_single() {
                return Err(Error::interpret(InterpretError::AmbiguousHolder(
                    holder_text.to_string(),
                )));
            }
            HolderExpr::Selector(selector)
        } else {
            let mut scanner = Scanner::new(holder_text, SCORE_LEXICON);
            let name = scanner.scan_string(&[])?;
            scanner.expect_end()?;
            if name == "*" {
                return Err(scanner.error("`*` is not a valid holder here"));
            }
            HolderExpr::Name(name)
        };

        let mut scanner = Scanner::new(objective, SCORE_LEXICON);
        let objective = scanner.scan_string(&[])?;
        scanner.expect_end()?;

        Ok(Self { holder, objective })
    }
}

impl fmt::Display for ScoreAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.holder, self.objective)
    }
}

/// Comparison between two scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `=`
    Equal,
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
}

impl Relation {
    const TOKENS: &'static [&'static str] = &["<", "<=", "=", ">=", ">"];

    /// Parses an operator.
    ///
    /// # Errors
    ///
    /// Returns a parse error for anything but `< <= = >= >`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text, SCORE_LEXICON);
        let relation = match scanner.consume_any(Self::TOKENS, true) {
            Some("<") => Self::Less,
            Some("<=") => Self::LessOrEqual,
            Some("=") => Self::Equal,
            Some(">=") => Self::GreaterOrEqual,
            Some(">") => Self::Greater,
            _ => return Err(scanner.error("expected one of < <= = >= >")),
        };
        scanner.expect_end()?;
        Ok(relation)
    }

    /// Applies the comparison.
    #[must_use]
    pub fn holds(self, left: i64, right: i64) -> bool {
        match self {
            Self::Less => left < right,
            Self::LessOrEqual => left <= right,
            Self::Equal => left == right,
            Self::GreaterOrEqual => left >= right,
            Self::Greater => left > right,
        }
    }

    /// The operator token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "=",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `a..b`, `..b`, `a..` or `a`.
///
/// # Errors
///
/// Returns a parse error for malformed text.
pub fn parse_range(text: &str) -> Result<IntRange> {
    let mut scanner = Scanner::new(text, SCORE_LEXICON);
    scanner.skip_whitespace();
    let range = scanner.scan_int_range()?;
    scanner.expect_end()?;
    Ok(range)
}
