use log::debug;

use crate::{
    ast::{Expr, Program},
    error::{Location, ParseError},
    interpreter::{
        lexer::{Keyword, Lexer, Token},
        parser::utils::ListItem,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum nesting before parsing gives up with `NestingTooDeep`.
///
/// Bounds both the parser's own recursion and the height of every expression
/// it returns, so a parsed program never nests deeper than this when walked.
pub const MAX_NESTING: usize = 256;

/// Parses source text into a program.
///
/// This is the entry point for parsing. Statements are parsed until the end of
/// input; a `;` after a statement is optional.
///
/// Grammar: `program := statement (";"? statement)*`
///
/// # Errors
/// Returns the first lexical or syntax error, located at the scanner position
/// where it was detected.
///
/// # Example
/// ```
/// use embedscript::parse;
///
/// let program = parse("a = 1; a + 2").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// let err = parse("a = (1").unwrap_err();
/// assert_eq!(err.to_string(), "Expecting punctuation: \")\" (1:6)");
/// ```
pub fn parse(source: &str) -> ParseResult<Program> {
    Parser::new(Lexer::new(source)).parse_program()
}

/// A recursive descent parser over a token stream.
#[derive(Debug)]
pub struct Parser<'a> {
    pub(in crate::interpreter::parser) lexer: Lexer<'a>,
    pub(in crate::interpreter::parser) depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser that consumes `lexer`.
    #[must_use]
    pub const fn new(lexer: Lexer<'a>) -> Self {
        Self { lexer, depth: 0 }
    }

    /// Parses statements until the end of input.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        debug!("parsing program");
        let mut statements = Vec::new();
        while !self.lexer.eof()? {
            statements.push(self.parse_expression()?);
            if self.is_punctuation(';')? {
                self.lexer.next()?;
            }
        }
        debug!("parsed program with {} statements", statements.len());
        Ok(Program { statements })
    }

    /// Parses a full expression: an atom, any binary operators following it,
    /// and a trailing call.
    pub(in crate::interpreter::parser) fn parse_expression(&mut self) -> ParseResult<Expr> {
        let atom = self.parse_atom()?;
        let expr = self.maybe_binary(atom, 0)?;
        self.maybe_call(expr)
    }

    /// Treats `expr` as a callee if it is followed by `(`.
    ///
    /// A `(` directly after a consumed `;` starts a new statement instead, so
    /// `f: x; (y)` does not call the result of `x`.
    pub(in crate::interpreter::parser) fn maybe_call(&mut self, expr: Expr) -> ParseResult<Expr> {
        if self.previous_is_punctuation(';') || !self.is_punctuation('(')? {
            return Ok(expr);
        }
        let arguments = self.parse_arguments()?;
        self.bounded(Expr::Call { callee: Box::new(expr),
                                  arguments })
    }

    /// Parses `"(" (expression ("," expression)*)? ")"`.
    pub(in crate::interpreter::parser) fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        self.nested(|parser| {
                parser.delimited('(', ')', ',', true, |parser| {
                          parser.parse_expression().map(ListItem::Next)
                      })
            })
    }

    /// Passes `expr` through if its height is within [`MAX_NESTING`].
    ///
    /// # Errors
    /// Returns `NestingTooDeep` for taller expressions.
    pub(in crate::interpreter::parser) fn bounded(&self, expr: Expr) -> ParseResult<Expr> {
        self.check_height(expr.height())?;
        Ok(expr)
    }

    pub(in crate::interpreter::parser) fn check_height(&self, height: usize) -> ParseResult<()> {
        if height > MAX_NESTING {
            return Err(ParseError::NestingTooDeep { location: self.location() });
        }
        Ok(())
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// Returns `NestingTooDeep` once [`MAX_NESTING`] levels are open.
    pub(in crate::interpreter::parser) fn nested<T>(&mut self,
                                                    parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                                                    -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { location: self.location() });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(in crate::interpreter::parser) fn is_punctuation(&mut self,
                                                         expected: char)
                                                         -> ParseResult<bool> {
        Ok(self.lexer.peek()?.is_some_and(|t| t.is_punctuation(expected)))
    }

    pub(in crate::interpreter::parser) fn is_keyword(&mut self,
                                                     expected: Keyword)
                                                     -> ParseResult<bool> {
        Ok(self.lexer.peek()?.is_some_and(|t| t.is_keyword(expected)))
    }

    fn previous_is_punctuation(&self, expected: char) -> bool {
        self.lexer.peek_left().is_some_and(|t| t.is_punctuation(expected))
    }

    pub(in crate::interpreter::parser) fn location(&self) -> Location {
        self.lexer.location()
    }

    /// Consumes the punctuation `expected` or fails.
    pub(in crate::interpreter::parser) fn skip_punctuation(&mut self,
                                                           expected: char)
                                                           -> ParseResult<()> {
        if self.is_punctuation(expected)? {
            self.lexer.next()?;
            return Ok(());
        }
        Err(ParseError::ExpectedPunctuation { expected,
                                              location: self.location() })
    }

    /// Consumes the keyword `expected` or fails.
    pub(in crate::interpreter::parser) fn skip_keyword(&mut self,
                                                       expected: Keyword)
                                                       -> ParseResult<()> {
        if self.is_keyword(expected)? {
            self.lexer.next()?;
            return Ok(());
        }
        Err(ParseError::ExpectedKeyword { expected: expected.as_str().to_string(),
                                          location: self.location(), })
    }

    /// Consumes the operator `expected` or fails.
    pub(in crate::interpreter::parser) fn skip_operator(&mut self,
                                                        expected: &str)
                                                        -> ParseResult<()> {
        if matches!(self.lexer.peek()?, Some(Token::Operator(op)) if op == expected) {
            self.lexer.next()?;
            return Ok(());
        }
        Err(ParseError::ExpectedOperator { expected: expected.to_string(),
                                           location: self.location(), })
    }

    /// Builds an `UnexpectedToken` error for `token`.
    pub(in crate::interpreter::parser) fn unexpected(&self,
                                                     token: Option<&Token>,
                                                     expecting: Option<&str>)
                                                     -> ParseError {
        ParseError::UnexpectedToken { token:     token.map_or_else(|| "end of input".to_string(),
                                                                   ToString::to_string),
                                      expecting: expecting.map(str::to_string),
                                      location:  self.location(), }
    }

    /// Builds an `UnexpectedToken` error for the token that would be read next.
    pub(in crate::interpreter::parser) fn unexpected_here(&mut self,
                                                          expecting: Option<&str>)
                                                          -> ParseError {
        match self.lexer.peek() {
            Ok(token) => {
                let token = token.cloned();
                self.unexpected(token.as_ref(), expecting)
            },
            Err(err) => err,
        }
    }
}
