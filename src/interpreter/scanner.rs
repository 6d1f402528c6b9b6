use crate::error::{Location, ParseError};

/// A character cursor over source text.
///
/// The scanner hands out one character at a time and keeps track of the
/// current line and column, so that every later phase can raise errors that
/// point back into the source.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source:   &'a str,
    position: usize,
    line:     usize,
    column:   usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source,
               position: 0,
               line: 1,
               column: 0 }
    }

    /// Creates a scanner over raw bytes.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidInput` if the bytes are not UTF-8 text.
    ///
    /// ## Example
    /// ```
    /// use embedscript::interpreter::scanner::Scanner;
    ///
    /// assert!(Scanner::from_utf8(b"a = 1").is_ok());
    /// assert!(Scanner::from_utf8(&[0xff, 0xfe]).is_err());
    /// ```
    pub fn from_utf8(bytes: &'a [u8]) -> Result<Self, ParseError> {
        let location = Location { line:   1,
                                  column: 0, };
        std::str::from_utf8(bytes).map(Self::new)
                                  .map_err(|_| ParseError::InvalidInput { location })
    }

    /// Consumes and returns the current character, or `None` at the end.
    pub fn next(&mut self) -> Option<char> {
        let character = self.source[self.position..].chars().next()?;
        self.position += character.len_utf8();
        if character == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(character)
    }

    /// Returns the current character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Returns up to `amount` upcoming characters without consuming them.
    ///
    /// The slice is shorter than `amount` characters near the end of input.
    #[must_use]
    pub fn peek_n(&self, amount: usize) -> &'a str {
        let rest = &self.source[self.position..];
        let end = rest.char_indices().nth(amount).map_or(rest.len(), |(i, _)| i);
        &rest[..end]
    }

    /// Returns `true` once every character has been consumed.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.peek().is_none()
    }

    /// The current line and column.
    #[must_use]
    pub const fn location(&self) -> Location {
        Location { line:   self.line,
                   column: self.column, }
    }

    /// Consumes characters while `predicate` holds and returns them.
    pub fn read_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let start = self.position;
        while let Some(character) = self.peek() {
            if !predicate(character) {
                break;
            }
            self.next();
        }
        &self.source[start..self.position]
    }
}
