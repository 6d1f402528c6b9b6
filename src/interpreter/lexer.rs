use std::fmt;

use log::trace;

use crate::{
    error::{Location, ParseError},
    interpreter::{parser::core::ParseResult, scanner::Scanner},
    util::num::parse_literal,
};

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `if`
    If,
    /// `else`
    Else,
    /// `true`
    True,
    /// `false`
    False,
    /// `final`
    Final,
    /// `function`
    Function,
    /// `return`
    Return,
}

impl Keyword {
    /// Looks up a keyword by its source text.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        let keyword = match word {
            "if" => Self::If,
            "else" => Self::Else,
            "true" => Self::True,
            "false" => Self::False,
            "final" => Self::Final,
            "function" => Self::Function,
            "return" => Self::Return,
            _ => return None,
        };
        Some(keyword)
    }

    /// The source text of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Else => "else",
            Self::True => "true",
            Self::False => "false",
            Self::Final => "final",
            Self::Function => "function",
            Self::Return => "return",
        }
    }

    /// `true` and `false` are keywords that denote boolean literals.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::True | Self::False)
    }
}

/// Represents a lexical token in the source input.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A number literal such as `42` or `0.5`.
    Number(f64),
    /// A string literal with escapes resolved.
    Str(String),
    /// A reserved word, including the boolean literals.
    Keyword(Keyword),
    /// A variable, parameter or property name.
    Identifier(String),
    /// One of `, ; ( ) { } . :`.
    Punctuation(char),
    /// A maximal run of operator characters, e.g. `==` or `+=`.
    Operator(String),
}

impl Token {
    /// Returns `true` if this is the given punctuation character.
    #[must_use]
    pub fn is_punctuation(&self, expected: char) -> bool {
        matches!(self, Self::Punctuation(c) if *c == expected)
    }

    /// Returns `true` if this is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, expected: Keyword) -> bool {
        matches!(self, Self::Keyword(k) if *k == expected)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Str(s) => write!(f, "string {s:?}"),
            Self::Keyword(k) => write!(f, "keyword \"{}\"", k.as_str()),
            Self::Identifier(name) => write!(f, "identifier \"{name}\""),
            Self::Punctuation(c) => write!(f, "punctuation \"{c}\""),
            Self::Operator(op) => write!(f, "operator \"{op}\""),
        }
    }
}

const fn is_identifier_start(character: char) -> bool {
    character.is_ascii_alphabetic() || character == '_'
}

/// Identifiers may continue with `? ! - < > =` and digits, so `done?`,
/// `a-b` and `x==y` each lex as a single identifier.
const fn is_identifier(character: char) -> bool {
    is_identifier_start(character)
    || character.is_ascii_digit()
    || matches!(character, '?' | '!' | '-' | '<' | '>' | '=')
}

const fn is_punctuation(character: char) -> bool {
    matches!(character, ',' | ';' | '(' | ')' | '{' | '}' | '.' | ':')
}

const fn is_operator(character: char) -> bool {
    matches!(character, '+' | '-' | '*' | '/' | '%' | '=' | '&' | '|' | '<' | '>' | '!')
}

/// Turns a character stream into tokens on demand.
///
/// The lexer keeps one token of lookahead ([`Lexer::peek`]) and remembers the
/// most recently consumed token ([`Lexer::peek_left`]). Whitespace and `//`
/// line comments are skipped transparently.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    scanner:  Scanner<'a>,
    current:  Option<Token>,
    previous: Option<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self::from_scanner(Scanner::new(source))
    }

    /// Creates a lexer that consumes an existing scanner.
    #[must_use]
    pub const fn from_scanner(scanner: Scanner<'a>) -> Self {
        Self { scanner,
               current: None,
               previous: None }
    }

    /// Collects every token of `source`.
    ///
    /// # Errors
    /// Returns the first lexical error encountered.
    ///
    /// ## Example
    /// ```
    /// use embedscript::interpreter::lexer::{Lexer, Token};
    ///
    /// let tokens = Lexer::tokenize("a += 1").unwrap();
    /// assert_eq!(tokens,
    ///            vec![Token::Identifier("a".to_string()),
    ///                 Token::Operator("+=".to_string()),
    ///                 Token::Number(1.0)]);
    /// ```
    pub fn tokenize(source: &'a str) -> ParseResult<Vec<Token>> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Consumes and returns the current token, or `None` at the end of input.
    pub fn next(&mut self) -> ParseResult<Option<Token>> {
        let token = match self.current.take() {
            Some(token) => Some(token),
            None => self.read_next()?,
        };
        self.previous.clone_from(&token);
        Ok(token)
    }

    /// Returns the current token without consuming it.
    pub fn peek(&mut self) -> ParseResult<Option<&Token>> {
        if self.current.is_none() {
            self.current = self.read_next()?;
        }
        Ok(self.current.as_ref())
    }

    /// Returns the most recently consumed token.
    #[must_use]
    pub const fn peek_left(&self) -> Option<&Token> {
        self.previous.as_ref()
    }

    /// Returns `true` once no tokens remain.
    pub fn eof(&mut self) -> ParseResult<bool> {
        Ok(self.peek()?.is_none())
    }

    /// The scanner's current line and column.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.scanner.location()
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.scanner.read_while(char::is_whitespace);
            if self.scanner.peek_n(2) != "//" {
                break;
            }
            self.scanner.read_while(|c| c != '\n');
            self.scanner.next();
        }
    }

    fn read_next(&mut self) -> ParseResult<Option<Token>> {
        self.skip_whitespace_and_comments();

        let Some(character) = self.scanner.peek() else {
            return Ok(None);
        };

        let token = if character == '"' {
            self.read_string()
        } else if character.is_ascii_digit() {
            self.read_number()?
        } else if is_identifier_start(character) {
            let word = self.scanner.read_while(is_identifier);
            Keyword::from_word(word).map_or_else(|| Token::Identifier(word.to_string()),
                                                 Token::Keyword)
        } else if is_punctuation(character) {
            self.scanner.next();
            Token::Punctuation(character)
        } else if is_operator(character) {
            Token::Operator(self.scanner.read_while(is_operator).to_string())
        } else {
            return Err(ParseError::UnexpectedCharacter { character,
                                                         location: self.scanner.location() });
        };

        trace!("token {token} at {}", self.scanner.location());
        Ok(Some(token))
    }

    /// Reads a double quoted string. A backslash takes the next character
    /// verbatim; an unterminated string ends at the end of input.
    fn read_string(&mut self) -> Token {
        let mut string = String::new();
        let mut escaped = false;
        self.scanner.next();
        while let Some(character) = self.scanner.next() {
            if escaped {
                string.push(character);
                escaped = false;
            } else if character == '\\' {
                escaped = true;
            } else if character == '"' {
                break;
            } else {
                string.push(character);
            }
        }
        Token::Str(string)
    }

    /// Reads digits with at most one `.`; a second `.` ends the number.
    fn read_number(&mut self) -> ParseResult<Token> {
        let mut has_dot = false;
        let text = self.scanner.read_while(|c| {
                                   if c == '.' {
                                       if has_dot {
                                           return false;
                                       }
                                       has_dot = true;
                                       return true;
                                   }
                                   c.is_ascii_digit()
                               });
        parse_literal(text).map(Token::Number)
                           .ok_or_else(|| ParseError::UnexpectedToken { token:     text.to_string(),
                                                                        expecting: Some("number".to_string()),
                                                                        location:  self.scanner.location(), })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token::Identifier(name.to_string())
    }

    fn op(symbol: &str) -> Token {
        Token::Operator(symbol.to_string())
    }

    #[test]
    fn skips_whitespace_and_comments() {
        let tokens = Lexer::tokenize("// leading\n  a // trailing\n// another\n;").unwrap();
        assert_eq!(tokens, vec![ident("a"), Token::Punctuation(';')]);
    }

    #[test]
    fn comment_at_end_of_input() {
        assert_eq!(Lexer::tokenize("1 // done").unwrap(), vec![Token::Number(1.0)]);
    }

    #[test]
    fn strings_take_escaped_characters_verbatim() {
        let tokens = Lexer::tokenize(r#""a\"b\\c\n""#).unwrap();
        assert_eq!(tokens, vec![Token::Str("a\"b\\cn".to_string())]);
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        assert_eq!(Lexer::tokenize("\"abc").unwrap(), vec![Token::Str("abc".to_string())]);
    }

    #[test]
    fn numbers_allow_a_single_dot() {
        assert_eq!(Lexer::tokenize("3.25").unwrap(), vec![Token::Number(3.25)]);
        assert_eq!(Lexer::tokenize("1.2.3").unwrap(),
                   vec![Token::Number(1.2), Token::Punctuation('.'), Token::Number(3.0)]);
        assert_eq!(Lexer::tokenize("7.").unwrap(), vec![Token::Number(7.0)]);
    }

    #[test]
    fn identifiers_use_the_wide_continuation_set() {
        assert_eq!(Lexer::tokenize("done?").unwrap(), vec![ident("done?")]);
        assert_eq!(Lexer::tokenize("a-b").unwrap(), vec![ident("a-b")]);
        assert_eq!(Lexer::tokenize("x==y").unwrap(), vec![ident("x==y")]);
        assert_eq!(Lexer::tokenize("user_2").unwrap(), vec![ident("user_2")]);
    }

    #[test]
    fn keywords_are_recognized() {
        let tokens = Lexer::tokenize("if else true false final function return iffy").unwrap();
        assert_eq!(tokens,
                   vec![Token::Keyword(Keyword::If),
                        Token::Keyword(Keyword::Else),
                        Token::Keyword(Keyword::True),
                        Token::Keyword(Keyword::False),
                        Token::Keyword(Keyword::Final),
                        Token::Keyword(Keyword::Function),
                        Token::Keyword(Keyword::Return),
                        ident("iffy")]);
        assert!(Keyword::True.is_boolean());
        assert!(!Keyword::Final.is_boolean());
    }

    #[test]
    fn operators_are_greedy_runs() {
        let tokens = Lexer::tokenize("a == b && c += 1 ** 2 !").unwrap();
        assert_eq!(tokens,
                   vec![ident("a"),
                        op("=="),
                        ident("b"),
                        op("&&"),
                        ident("c"),
                        op("+="),
                        Token::Number(1.0),
                        op("**"),
                        Token::Number(2.0),
                        op("!")]);
    }

    #[test]
    fn punctuation_is_single_character() {
        let tokens = Lexer::tokenize("f(a, b).c:{;}").unwrap();
        assert_eq!(tokens,
                   vec![ident("f"),
                        Token::Punctuation('('),
                        ident("a"),
                        Token::Punctuation(','),
                        ident("b"),
                        Token::Punctuation(')'),
                        Token::Punctuation('.'),
                        ident("c"),
                        Token::Punctuation(':'),
                        Token::Punctuation('{'),
                        Token::Punctuation(';'),
                        Token::Punctuation('}')]);
    }

    #[test]
    fn unknown_character_is_located() {
        let err = Lexer::tokenize("a\n  #").unwrap_err();
        assert_eq!(err.to_string(), "Can't handle character: # (2:2)");
    }

    #[test]
    fn peek_and_peek_left() {
        let mut lexer = Lexer::new("a;b");
        assert_eq!(lexer.peek_left(), None);
        assert_eq!(lexer.peek().unwrap(), Some(&ident("a")));
        assert_eq!(lexer.next().unwrap(), Some(ident("a")));
        assert_eq!(lexer.next().unwrap(), Some(Token::Punctuation(';')));
        assert_eq!(lexer.peek_left(), Some(&Token::Punctuation(';')));
        assert_eq!(lexer.peek().unwrap(), Some(&ident("b")));
        assert_eq!(lexer.peek_left(), Some(&Token::Punctuation(';')));
        lexer.next().unwrap();
        assert!(lexer.eof().unwrap());
        assert_eq!(lexer.next().unwrap(), None);
    }
}
