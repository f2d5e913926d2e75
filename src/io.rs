//! Low-level text cursor and sink.
//!
//! This module provides the two primitives every codec operates on: a
//! position-tracked cursor over borrowed input text, and an append-only
//! sink that accumulates output text. Literal matching is exact; neither
//! side tolerates or inserts whitespace.

use crate::error::{Result, TagcodeError};

/// How many characters of unmatched input a parse error quotes.
const SNIPPET_LEN: usize = 24;

/// A cursor over the text being parsed.
///
/// The cursor only ever moves forward. A failed [`expect`](TextInput::expect)
/// leaves the position untouched so the error offset points at the exact
/// character that did not match.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TextInput<'a> {
    /// Creates a cursor positioned at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Current byte offset from the start of the input.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The not-yet-consumed tail of the input.
    pub fn remaining(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Returns true once the whole input has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes `literal` if it is next, or fails without advancing.
    pub fn expect(&mut self, literal: &str) -> Result<()> {
        if self.remaining().starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(TagcodeError::Parse(format!(
                "expected {:?} at offset {}, found {}",
                literal,
                self.pos,
                describe(self.remaining())
            )))
        }
    }

    /// Consumes the maximal (possibly empty) prefix whose characters satisfy `accept`.
    pub fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let rest = self.remaining();
        let end = rest
            .char_indices()
            .find(|(_, c)| !accept(*c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += end;
        &rest[..end]
    }

    /// Reads the identifier at the cursor without consuming it.
    ///
    /// An identifier is a nonempty run of ASCII alphanumerics and underscores.
    /// Polymorphic decoding uses this to look at the leading type tag before
    /// delegating the full read to the resolved registration.
    pub fn peek_identifier(&self) -> Result<&'a str> {
        let rest = self.remaining();
        let end = rest
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
            .map_or(rest.len(), |(i, _)| i);
        if end == 0 {
            return Err(TagcodeError::Parse(format!(
                "expected a type tag at offset {}, found {}",
                self.pos,
                describe(rest)
            )));
        }
        Ok(&rest[..end])
    }

    /// Fails unless the whole input has been consumed.
    pub fn expect_end(&self) -> Result<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(TagcodeError::Parse(format!(
                "trailing input at offset {}: {}",
                self.pos,
                describe(self.remaining())
            )))
        }
    }
}

/// Quotes the head of `rest` for an error message, or names end-of-input.
fn describe(rest: &str) -> String {
    if rest.is_empty() {
        return "end of input".to_string();
    }
    if rest.len() <= SNIPPET_LEN {
        return format!("{rest:?}");
    }
    let mut end = SNIPPET_LEN;
    while !rest.is_char_boundary(end) {
        end -= 1;
    }
    format!("{:?}...", &rest[..end])
}

/// An append-only sink accumulating output text.
#[derive(Debug, Default)]
pub struct TextOutput {
    buf: String,
}

impl TextOutput {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Creates an empty sink with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Appends `text` to the output.
    pub fn append(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// The text produced so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Number of bytes produced so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true while nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the sink, returning the produced text.
    pub fn into_string(self) -> String {
        self.buf
    }
}
