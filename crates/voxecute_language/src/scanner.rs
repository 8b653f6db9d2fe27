//! Cursor-based scanning shared by every grammar.
//!
//! A [`Scanner`] walks source text one character at a time. Grammars do not
//! re-implement scanning: each one wraps a scanner configured with its own
//! [`Lexicon`] (whitespace, quotes, boolean words, forbidden symbols).

use voxecute_foundation::{Error, IntRange, Result};

/// Characters and words a grammar treats specially.
#[derive(Clone, Copy, Debug)]
pub struct Lexicon {
    /// Characters skipped between tokens.
    pub whitespace: &'static [char],
    /// Characters that open (and close) a quoted string.
    pub quotes: &'static [char],
    /// Words read as `true`.
    pub true_words: &'static [&'static str],
    /// Words read as `false`.
    pub false_words: &'static [&'static str],
    /// Characters not allowed inside unquoted strings.
    pub symbols: &'static [char],
}

impl Lexicon {
    /// A lexicon with ASCII whitespace, double quotes and `true`/`false`.
    pub const DEFAULT: Self = Self {
        whitespace: &[' ', '\t', '\n', '\r'],
        quotes: &['"'],
        true_words: &["true"],
        false_words: &["false"],
        symbols: &[],
    };
}

/// A scanned number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Number {
    /// The value.
    pub value: f64,
    /// The exact value when written without a decimal point.
    pub integer: Option<i64>,
}

impl Number {
    /// True if the number was written without a decimal point.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.integer.is_some()
    }
}

/// How many characters of context a parse error shows on each side.
const WINDOW: usize = 8;

/// Recursive-descent text scanner.
#[derive(Clone, Debug)]
pub struct Scanner<'src> {
    source: &'src str,
    position: usize,
    lexicon: Lexicon,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str, lexicon: Lexicon) -> Self {
        Self {
            source,
            position: 0,
            lexicon,
        }
    }

    /// The full source text.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Text from the cursor to the end.
    #[must_use]
    pub fn rest(&self) -> &'src str {
        &self.source[self.position..]
    }

    /// Saves the cursor.
    #[must_use]
    pub fn checkpoint(&self) -> usize {
        self.position
    }

    /// Restores a cursor saved with [`Scanner::checkpoint`].
    pub fn rewind(&mut self, checkpoint: usize) {
        self.position = checkpoint;
    }

    /// Returns true if `c` is whitespace in this lexicon.
    #[must_use]
    pub fn is_whitespace(&self, c: char) -> bool {
        self.lexicon.whitespace.contains(&c)
    }

    /// Skips whitespace.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            if !self.is_whitespace(c) {
                break;
            }
            self.position += c.len_utf8();
        }
    }

    /// Returns true if nothing but (optionally) whitespace remains.
    pub fn at_end(&mut self, skip_ws: bool) -> bool {
        self.peek(skip_ws).is_none()
    }

    /// Looks at the next character without consuming it.
    pub fn peek(&mut self, skip_ws: bool) -> Option<char> {
        if skip_ws {
            self.skip_whitespace();
        }
        self.rest().chars().next()
    }

    /// Consumes the next character.
    pub fn advance(&mut self, skip_ws: bool) -> Option<char> {
        let c = self.peek(skip_ws)?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// The longest candidate the remaining text starts with, not consumed.
    pub fn test_any<'c>(&mut self, candidates: &[&'c str], skip_ws: bool) -> Option<&'c str> {
        if skip_ws {
            self.skip_whitespace();
        }
        let rest = self.rest();
        candidates
            .iter()
            .copied()
            .filter(|c| !c.is_empty() && rest.starts_with(c))
            .max_by_key(|c| c.len())
    }

    /// The longest candidate the remaining text starts with, consumed.
    pub fn consume_any<'c>(&mut self, candidates: &[&'c str], skip_ws: bool) -> Option<&'c str> {
        let found = self.test_any(candidates, skip_ws)?;
        self.position += found.len();
        Some(found)
    }

    /// Consumes `token` or fails.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the text does not continue with `token`.
    pub fn expect(&mut self, token: &str, skip_ws: bool) -> Result<()> {
        if self.consume_any(&[token], skip_ws).is_some() {
            Ok(())
        } else {
            Err(self.error(format!("expected `{token}`")))
        }
    }

    /// Fails unless nothing but whitespace remains.
    ///
    /// # Errors
    ///
    /// Returns a parse error naming the trailing text.
    pub fn expect_end(&mut self) -> Result<()> {
        if self.at_end(true) {
            Ok(())
        } else {
            Err(self.error("unexpected trailing text"))
        }
    }

    /// Scans a quoted string starting at the cursor.
    ///
    /// The string ends at the quote character that opened it; a backslash
    /// makes the following character literal.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the cursor is not at a quote or the string is
    /// unterminated.
    pub fn scan_quoted(&mut self) -> Result<String> {
        let quote = match self.peek(false) {
            Some(q) if self.lexicon.quotes.contains(&q) => q,
            _ => return Err(self.error("expected quoted string")),
        };
        let start = self.position;
        self.advance(false);
        let mut text = String::new();
        loop {
            match self.advance(false) {
                Some('\\') => match self.advance(false) {
                    Some(c) => text.push(c),
                    None => break,
                },
                Some(c) if c == quote => return Ok(text),
                Some(c) => text.push(c),
                None => break,
            }
        }
        self.position = start;
        Err(self.error("unterminated quoted string"))
    }

    /// Scans an unquoted string ending at whitespace, the end of input, or a
    /// `stop` character.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the string is empty or contains a symbol the
    /// lexicon forbids.
    pub fn scan_unquoted(&mut self, stop: &[char]) -> Result<String> {
        let start = self.position;
        while let Some(c) = self.peek(false) {
            if self.is_whitespace(c) || stop.contains(&c) {
                break;
            }
            if self.lexicon.symbols.contains(&c) {
                return Err(self.error(format!("unexpected `{c}`")));
            }
            self.position += c.len_utf8();
        }
        if self.position == start {
            return Err(self.error("expected string"));
        }
        Ok(self.source[start..self.position].to_string())
    }

    /// Scans a quoted string if the cursor is at a quote, else an unquoted one.
    ///
    /// # Errors
    ///
    /// See [`Scanner::scan_quoted`] and [`Scanner::scan_unquoted`].
    pub fn scan_string(&mut self, stop: &[char]) -> Result<String> {
        match self.peek(true) {
            Some(q) if self.lexicon.quotes.contains(&q) => self.scan_quoted(),
            _ => self.scan_unquoted(stop),
        }
    }

    /// Returns true if a number starts at the cursor.
    pub fn at_number(&self) -> bool {
        let rest = self.rest();
        let unsigned = rest.strip_prefix(['-', '+']).unwrap_or(rest);
        let mut chars = unsigned.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Scans a number: optional sign, digits, and at most one decimal point
    /// followed by more digits.
    ///
    /// A `.` not followed by a digit is left alone, so `1..5` scans as `1`.
    ///
    /// # Errors
    ///
    /// Returns a parse error if no number starts at the cursor.
    pub fn scan_number(&mut self) -> Result<Number> {
        if !self.at_number() {
            return Err(self.error("expected number"));
        }
        let start = self.position;
        if matches!(self.peek(false), Some('-' | '+')) {
            self.position += 1;
        }
        let mut has_dot = false;
        while let Some(c) = self.peek(false) {
            if c.is_ascii_digit() {
                self.position += 1;
            } else if c == '.'
                && !has_dot
                && self.rest()[1..].starts_with(|d: char| d.is_ascii_digit())
            {
                has_dot = true;
                self.position += 1;
            } else {
                break;
            }
        }
        let text = &self.source[start..self.position];
        let value: f64 = text
            .parse()
            .map_err(|e| self.error(format!("invalid number `{text}`: {e}")))?;
        let integer = if has_dot {
            None
        } else {
            Some(
                text.parse::<i64>()
                    .map_err(|e| self.error(format!("invalid integer `{text}`: {e}")))?,
            )
        };
        Ok(Number { value, integer })
    }

    /// Scans a number that must be written as an integer.
    ///
    /// # Errors
    ///
    /// Returns a parse error if no integer starts at the cursor.
    pub fn scan_int(&mut self) -> Result<i64> {
        let start = self.position;
        let number = self.scan_number()?;
        number.integer.ok_or_else(|| {
            self.position = start;
            self.error("expected integer")
        })
    }

    /// Scans `a..b`, `..b`, `a..` or a single integer `a`.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed bounds or `..` with no bounds.
    pub fn scan_int_range(&mut self) -> Result<IntRange> {
        let min = if self.test_any(&[".."], false).is_some() {
            None
        } else {
            Some(self.scan_int()?)
        };
        if self.consume_any(&[".."], false).is_none() {
            return Ok(IntRange::new(min, min));
        }
        let max = if self.at_number() {
            Some(self.scan_int()?)
        } else {
            None
        };
        if min.is_none() && max.is_none() {
            return Err(self.error("range needs at least one bound"));
        }
        Ok(IntRange::new(min, max))
    }

    /// Scans one of the lexicon's boolean words.
    ///
    /// # Errors
    ///
    /// Returns a parse error if neither a true nor a false word follows.
    pub fn scan_bool(&mut self) -> Result<bool> {
        let words: Vec<&str> = self
            .lexicon
            .true_words
            .iter()
            .chain(self.lexicon.false_words)
            .copied()
            .collect();
        match self.consume_any(&words, false) {
            Some(word) => Ok(self.lexicon.true_words.contains(&word)),
            None => Err(self.error("expected boolean")),
        }
    }

    /// Scans a run of characters matching `accept`, possibly empty.
    pub fn scan_while(&mut self, accept: impl Fn(char) -> bool) -> &'src str {
        let start = self.position;
        while let Some(c) = self.peek(false) {
            if !accept(c) {
                break;
            }
            self.position += c.len_utf8();
        }
        &self.source[start..self.position]
    }

    /// Builds a parse error at the cursor with surrounding context.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> Error {
        let before: String = {
            let head = &self.source[..self.position];
            let skip = head.chars().count().saturating_sub(WINDOW);
            head.chars().skip(skip).collect()
        };
        let after: String = self.rest().chars().take(WINDOW).collect();
        Error::parse(message, self.position, before, after)
    }
}
