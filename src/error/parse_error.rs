use std::fmt;

/// A position in the source text.
///
/// Lines are 1-based. The column counts characters consumed since the last
/// newline, so it is 0 at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The source line.
    pub line:   usize,
    /// The column on that line.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The scanner met a character no token can start with.
    #[error("Can't handle character: {character} ({location})")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Where the scanner stood when the error was raised.
        location:  Location,
    },
    /// Found a token that cannot appear at this position.
    #[error("Unexpected token: {token}{} ({location})", expecting_suffix(.expecting.as_deref()))]
    UnexpectedToken {
        /// A printable representation of the token.
        token:     String,
        /// What the parser would have accepted instead, if known.
        expecting: Option<String>,
        /// Where the scanner stood when the error was raised.
        location:  Location,
    },
    /// A specific punctuation character was required.
    #[error("Expecting punctuation: \"{expected}\" ({location})")]
    ExpectedPunctuation {
        /// The punctuation that was required.
        expected: char,
        /// Where the scanner stood when the error was raised.
        location: Location,
    },
    /// A specific operator was required.
    #[error("Expecting operator: \"{expected}\" ({location})")]
    ExpectedOperator {
        /// The operator that was required.
        expected: String,
        /// Where the scanner stood when the error was raised.
        location: Location,
    },
    /// A specific keyword was required.
    #[error("Expecting keyword: \"{expected}\" ({location})")]
    ExpectedKeyword {
        /// The keyword that was required.
        expected: String,
        /// Where the scanner stood when the error was raised.
        location: Location,
    },
    /// Expressions were nested deeper than the parser allows.
    #[error("Nesting too deep ({location})")]
    NestingTooDeep {
        /// Where the scanner stood when the error was raised.
        location: Location,
    },
    /// The input handed to the scanner was not valid UTF-8 text.
    #[error("Code input should be a string ({location})")]
    InvalidInput {
        /// Always `1:0`; nothing has been scanned yet.
        location: Location,
    },
}

fn expecting_suffix(expecting: Option<&str>) -> String {
    expecting.map(|e| format!(" expecting {e}")).unwrap_or_default()
}

impl ParseError {
    /// Returns the location at which the error was raised.
    ///
    /// ## Example
    /// ```
    /// use embedscript::parse;
    ///
    /// let err = parse("a = )").unwrap_err();
    /// assert_eq!(err.location().line, 1);
    /// ```
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::UnexpectedCharacter { location, .. }
            | Self::UnexpectedToken { location, .. }
            | Self::ExpectedPunctuation { location, .. }
            | Self::ExpectedOperator { location, .. }
            | Self::ExpectedKeyword { location, .. }
            | Self::NestingTooDeep { location }
            | Self::InvalidInput { location } => *location,
        }
    }
}
