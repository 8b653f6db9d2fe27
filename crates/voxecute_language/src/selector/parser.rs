//! Selector grammar.
//!
//! ```text
//! selector  := '@' type ('[' args? ']')? | name
//! args      := arg (',' arg)*
//! arg       := key '=' '!'? value
//! value     := map | list | quoted | '~' number? | range | number | bool | text
//! map       := '{' (key '=' '!'? value (',' key '=' '!'? value)*)? '}'
//! list      := '[' (value (',' value)*)? ']'
//! range     := int '..' int? | '..' int
//! ```
//!
//! Numbers and booleans are tried first; when the token keeps going past
//! where a number or boolean would end, it is re-read as text.

use std::collections::BTreeMap;

use tracing::trace;
use voxecute_foundation::{
    ArgValue, Error, ErrorContext, InterpretError, MapEntry, Result,
};

use super::registry::{Duplication, SelectorRegistry, SelectorType};
use super::{Argument, Selector};
use crate::scanner::{Lexicon, Scanner};

/// Lexicon for selector text.
pub const SELECTOR_LEXICON: Lexicon = Lexicon {
    whitespace: &[' ', '\t', '\n', '\r'],
    quotes: &['"'],
    true_words: &["true"],
    false_words: &["false"],
    symbols: &['=', '!', '{', '[', '@', '"', '\\', '~', '^'],
};

/// Characters ending an unquoted value.
const VALUE_STOPS: &[char] = &[',', ']', '}'];

struct ParsedArgument {
    key: String,
    inverted: bool,
    value: ArgValue,
}

/// Parses selector text.
pub struct SelectorParser<'r, 'src> {
    registry: &'r SelectorRegistry,
    scanner: Scanner<'src>,
}

impl<'r, 'src> SelectorParser<'r, 'src> {
    /// Creates a parser at the start of `source`.
    #[must_use]
    pub fn new(registry: &'r SelectorRegistry, source: &'src str) -> Self {
        Self {
            registry,
            scanner: Scanner::new(source, SELECTOR_LEXICON),
        }
    }

    /// Parses `text` as exactly one selector.
    ///
    /// # Errors
    ///
    /// See [`Selector::parse`].
    pub fn parse(registry: &'r SelectorRegistry, text: &'src str) -> Result<Selector> {
        let mut parser = Self::new(registry, text);
        let selector = parser.selector().map_err(|e| {
            if e.is_interpret() {
                e.with_context(ErrorContext::new().with_source(text))
            } else {
                e
            }
        })?;
        parser.scanner.expect_end()?;
        trace!(selector = %selector, "parsed selector");
        Ok(selector)
    }

    /// Parses one selector, leaving any text after it unread.
    ///
    /// # Errors
    ///
    /// See [`Selector::parse`].
    pub fn selector(&mut self) -> Result<Selector> {
        match self.scanner.peek(true) {
            Some('@') => {
                self.scanner.advance(false);
                let name = self
                    .scanner
                    .scan_while(|c| c.is_ascii_alphanumeric() || c == '_');
                let selector_type = *self.registry.selector_type(name).ok_or_else(|| {
                    Error::interpret(InterpretError::UnknownSelectorType(name.to_string()))
                })?;
                let arguments = if self.scanner.peek(false) == Some('[') {
                    self.arguments()?
                } else {
                    Vec::new()
                };
                self.build(selector_type, arguments)
            }
            Some(_) => {
                let name = self.scanner.scan_string(&[])?;
                let mut arguments = BTreeMap::new();
                arguments.insert(
                    "name".to_string(),
                    vec![Argument {
                        inverted: false,
                        value: ArgValue::Text(name),
                    }],
                );
                Ok(Selector::new(*self.registry.name_type(), arguments))
            }
            None => Err(self.scanner.error("expected selector")),
        }
    }

    /// Text after the last parsed selector.
    #[must_use]
    pub fn rest(&self) -> &'src str {
        self.scanner.rest()
    }

    fn arguments(&mut self) -> Result<Vec<ParsedArgument>> {
        self.scanner.expect("[", false)?;
        let mut out = Vec::new();
        if self.scanner.consume_any(&["]"], true).is_some() {
            return Ok(out);
        }
        loop {
            let key = self.scanner.scan_string(&['=', ',', ']'])?;
            self.scanner.expect("=", true)?;
            let inverted = self.scanner.consume_any(&["!"], true).is_some();
            let value = self.value()?;
            out.push(ParsedArgument {
                key,
                inverted,
                value,
            });
            if self.scanner.consume_any(&[","], true).is_none() {
                self.scanner.expect("]", true)?;
                return Ok(out);
            }
        }
    }

    fn value(&mut self) -> Result<ArgValue> {
        let value = match self.scanner.peek(true) {
            Some('{') => return self.map(),
            Some('[') => return self.list(),
            Some('"') => return Ok(ArgValue::Text(self.scanner.scan_quoted()?)),
            Some('~') => {
                self.scanner.advance(false);
                let offset = if self.scanner.at_number() {
                    self.scanner.scan_number()?.value
                } else {
                    0.0
                };
                ArgValue::Relative(offset)
            }
            Some(_) if self.scanner.test_any(&[".."], false).is_some() => {
                ArgValue::Range(self.scanner.scan_int_range()?)
            }
            Some(_) if self.scanner.at_number() => return self.number_or_text(),
            Some(_) if self.scanner.test_any(&["true", "false"], false).is_some() => {
                return self.bool_or_text();
            }
            Some(_) => return Ok(ArgValue::Text(self.scanner.scan_unquoted(VALUE_STOPS)?)),
            None => return Err(self.scanner.error("expected value")),
        };
        if self.at_terminator() {
            Ok(value)
        } else {
            Err(self.scanner.error("unexpected text after value"))
        }
    }

    fn number_or_text(&mut self) -> Result<ArgValue> {
        let start = self.scanner.checkpoint();
        let number = self.scanner.scan_number()?;
        if self.scanner.test_any(&[".."], false).is_some() {
            self.scanner.rewind(start);
            return Ok(ArgValue::Range(self.scanner.scan_int_range()?));
        }
        if self.at_terminator() {
            return Ok(match number.integer {
                Some(n) => ArgValue::Int(n),
                None => ArgValue::Float(number.value),
            });
        }
        self.scanner.rewind(start);
        Ok(ArgValue::Text(self.scanner.scan_unquoted(VALUE_STOPS)?))
    }

    fn bool_or_text(&mut self) -> Result<ArgValue> {
        let start = self.scanner.checkpoint();
        let value = self.scanner.scan_bool()?;
        if self.at_terminator() {
            return Ok(ArgValue::Bool(value));
        }
        self.scanner.rewind(start);
        Ok(ArgValue::Text(self.scanner.scan_unquoted(VALUE_STOPS)?))
    }

    fn map(&mut self) -> Result<ArgValue> {
        self.scanner.expect("{", true)?;
        let mut entries = Vec::new();
        if self.scanner.consume_any(&["}"], true).is_some() {
            return Ok(ArgValue::Map(entries));
        }
        loop {
            let key = self.scanner.scan_string(&['=', ',', '}'])?;
            self.scanner.expect("=", true)?;
            let inverted = self.scanner.consume_any(&["!"], true).is_some();
            let value = self.value()?;
            entries.push(MapEntry::new(key, inverted, value));
            if self.scanner.consume_any(&[","], true).is_none() {
                self.scanner.expect("}", true)?;
                return Ok(ArgValue::Map(entries));
            }
        }
    }

    fn list(&mut self) -> Result<ArgValue> {
        self.scanner.expect("[", true)?;
        let mut items = Vec::new();
        if self.scanner.consume_any(&["]"], true).is_some() {
            return Ok(ArgValue::List(items));
        }
        loop {
            items.push(self.value()?);
            if self.scanner.consume_any(&[","], true).is_none() {
                self.scanner.expect("]", true)?;
                return Ok(ArgValue::List(items));
            }
        }
    }

    fn at_terminator(&mut self) -> bool {
        match self.scanner.peek(false) {
            None => true,
            Some(c) => self.scanner.is_whitespace(c) || VALUE_STOPS.contains(&c),
        }
    }

    fn build(&self, selector_type: SelectorType, parsed: Vec<ParsedArgument>) -> Result<Selector> {
        let mut arguments: BTreeMap<String, Vec<Argument>> = BTreeMap::new();
        for ParsedArgument {
            key,
            inverted,
            value,
        } in parsed
        {
            let spec = self
                .registry
                .argument(&key)
                .ok_or_else(|| Error::interpret(InterpretError::UnknownArgument(key.clone())))?;
            if inverted && !spec.invertible {
                return Err(Error::interpret(InterpretError::NotInvertible(key)));
            }
            if !spec.shape.matches(&value) {
                return Err(Error::interpret(InterpretError::ShapeMismatch {
                    argument: key,
                    value: value.to_string(),
                }));
            }
            if key == "type"
                && selector_type
                    .traits
                    .type_restriction
                    .is_some_and(|r| !r.overridable)
            {
                return Err(Error::interpret(InterpretError::TypeRestricted(
                    selector_type.name.to_string(),
                )));
            }
            arguments
                .entry(key)
                .or_default()
                .push(Argument { inverted, value });
        }

        for (key, occurrences) in &arguments {
            let duplication = self
                .registry
                .argument(key)
                .map_or(Duplication::Always, |spec| spec.duplication);
            let violated = match duplication {
                Duplication::Never => occurrences.len() > 1,
                Duplication::InvertedOnly => occurrences.iter().filter(|a| !a.inverted).count() > 1,
                Duplication::Always => false,
            };
            if violated {
                return Err(Error::interpret(InterpretError::Duplicated(key.clone())));
            }
        }

        Ok(Selector::new(selector_type, arguments))
    }
}
