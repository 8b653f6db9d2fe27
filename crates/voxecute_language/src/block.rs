//! Block predicates: `stone`, `minecraft:wheat[age=7]`, `chest["facing":"north"]`.

use std::fmt;

use voxecute_foundation::{Result, StateValue};
use voxecute_storage::{Block, qualify_type};

use crate::scanner::{Lexicon, Scanner};

/// Lexicon for block text.
pub const BLOCK_LEXICON: Lexicon = Lexicon {
    whitespace: &[' ', '\t'],
    quotes: &['"'],
    true_words: &["true"],
    false_words: &["false"],
    symbols: &['[', ']', '=', '"', '{', '}'],
};

const STATE_STOPS: &[char] = &['=', ':', ',', ']'];

/// A block id plus the states it must have.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockPredicate {
    id: String,
    states: Vec<(String, StateValue)>,
}

impl BlockPredicate {
    /// A predicate on the id alone.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: qualify_type(id),
            states: Vec::new(),
        }
    }

    /// Also requires a state.
    #[must_use]
    pub fn with_state(mut self, key: impl Into<String>, value: StateValue) -> Self {
        self.states.push((key.into(), value));
        self
    }

    /// Parses `id` or `id[key=value,...]`. State keys and text values may be
    /// quoted; `:` may stand in for `=`.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut scanner = Scanner::new(text, BLOCK_LEXICON);
        scanner.skip_whitespace();
        let id = scanner.scan_unquoted(&['['])?;
        let mut predicate = Self::new(&id);
        if scanner.consume_any(&["["], true).is_some()
            && scanner.consume_any(&["]"], true).is_none()
        {
            loop {
                let key = scanner.scan_string(STATE_STOPS)?;
                if scanner.consume_any(&["=", ":"], true).is_none() {
                    return Err(scanner.error("expected `=`"));
                }
                let value = state_value(&mut scanner)?;
                predicate.states.push((key, value));
                if scanner.consume_any(&[","], true).is_none() {
                    scanner.expect("]", true)?;
                    break;
                }
            }
        }
        scanner.expect_end()?;
        Ok(predicate)
    }

    /// Qualified block id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Required states, in written order.
    #[must_use]
    pub fn states(&self) -> &[(String, StateValue)] {
        &self.states
    }

    /// True if the block has this id and every listed state.
    #[must_use]
    pub fn matches(&self, block: &Block) -> bool {
        block.id == self.id
            && self
                .states
                .iter()
                .all(|(key, value)| block.state(key) == Some(value))
    }
}

fn state_value(scanner: &mut Scanner<'_>) -> Result<StateValue> {
    match scanner.peek(true) {
        Some('"') => Ok(StateValue::Text(scanner.scan_quoted()?)),
        Some(_) if scanner.at_number() => Ok(StateValue::Int(scanner.scan_int()?)),
        Some(_) => {
            let word = scanner.scan_unquoted(&[',', ']'])?;
            Ok(match word.as_str() {
                "true" => StateValue::Bool(true),
                "false" => StateValue::Bool(false),
                _ => StateValue::Text(word),
            })
        }
        None => Err(scanner.error("expected state value")),
    }
}

impl fmt::Display for BlockPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        if self.states.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, (key, value)) in self.states.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("]")
    }
}
