use std::rc::Rc;

use crate::{
    ast::{ElseIf, Expr, FunctionDef, LiteralValue, Property},
    interpreter::{
        lexer::{Keyword, Token},
        parser::{
            core::{ParseResult, Parser},
            utils::ListItem,
        },
    },
};

impl Parser<'_> {
    /// Parses an atom and an optional call directly following it.
    ///
    /// Atoms are the operands of binary expressions:
    /// - `"(" expression ")"`
    /// - a `{ ... }` block
    /// - `if`, `final` and `function` forms
    /// - `true` / `false`
    /// - a variable with its property chain
    /// - a number or string literal
    ///
    /// # Errors
    /// Returns `NestingTooDeep` when atoms nest too deeply or the atom is
    /// taller than `MAX_NESTING`, or
    /// `UnexpectedToken` if no atom starts at the current token.
    pub(in crate::interpreter::parser) fn parse_atom(&mut self) -> ParseResult<Expr> {
        let atom = self.nested(Self::parse_bare_atom)?;
        let atom = self.maybe_call(atom)?;
        self.bounded(atom)
    }

    fn parse_bare_atom(&mut self) -> ParseResult<Expr> {
        match self.lexer.peek()? {
            Some(Token::Punctuation('(')) => {
                self.lexer.next()?;
                let expr = self.parse_expression()?;
                self.skip_punctuation(')')?;
                Ok(expr)
            },
            Some(Token::Punctuation('{')) => self.parse_block(false).map(Expr::Program),
            Some(Token::Keyword(Keyword::If)) => self.parse_if(),
            Some(Token::Keyword(keyword)) if keyword.is_boolean() => {
                let value = *keyword == Keyword::True;
                self.lexer.next()?;
                Ok(Expr::Literal(LiteralValue::Bool(value)))
            },
            Some(Token::Keyword(Keyword::Final)) => self.parse_final(),
            Some(Token::Keyword(Keyword::Function)) => self.parse_function(),
            Some(Token::Identifier(_)) => self.parse_variable(),
            _ => match self.lexer.next()? {
                Some(Token::Number(n)) => Ok(Expr::Literal(LiteralValue::Number(n))),
                Some(Token::Str(s)) => Ok(Expr::Literal(LiteralValue::String(s))),
                other => Err(self.unexpected(other.as_ref(), None)),
            },
        }
    }

    /// Parses a conditional.
    ///
    /// A `;` directly after a branch belongs to the branch, so
    /// `if a: x; else: y` is one expression. The `else` branch does not take
    /// a trailing `;`.
    ///
    /// Grammar:
    /// `if := "if" expression ":" expression ";"? ("else" "if" expression ":" expression ";"?)* ("else" ":" expression)?`
    fn parse_if(&mut self) -> ParseResult<Expr> {
        self.skip_keyword(Keyword::If)?;
        let condition = self.parse_expression()?;
        self.skip_punctuation(':')?;
        let then_branch = self.parse_expression()?;
        self.skip_optional_semicolon()?;

        let mut else_ifs = Vec::new();
        let mut else_branch = None;
        while self.is_keyword(Keyword::Else)? {
            self.lexer.next()?;
            if !self.is_keyword(Keyword::If)? {
                self.skip_punctuation(':')?;
                else_branch = Some(Box::new(self.parse_expression()?));
                break;
            }
            self.lexer.next()?;
            let condition = self.parse_expression()?;
            self.skip_punctuation(':')?;
            let then = self.parse_expression()?;
            self.skip_optional_semicolon()?;
            else_ifs.push(ElseIf { condition, then });
        }

        Ok(Expr::If { condition: Box::new(condition),
                      then_branch: Box::new(then_branch),
                      else_ifs,
                      else_branch })
    }

    fn skip_optional_semicolon(&mut self) -> ParseResult<()> {
        if self.is_punctuation(';')? {
            self.lexer.next()?;
        }
        Ok(())
    }

    /// Parses a constant definition.
    ///
    /// Grammar: `final := "final" variable "=" expression`
    fn parse_final(&mut self) -> ParseResult<Expr> {
        self.skip_keyword(Keyword::Final)?;
        let variable = self.parse_variable()?;
        self.skip_operator("=")?;
        let value = self.parse_expression()?;
        Ok(Expr::Assign { left:     Box::new(variable),
                          right:    Box::new(value),
                          is_final: true, })
    }

    /// Parses a function definition.
    ///
    /// A block body may contain `return`. An expression body must be
    /// terminated by `;`, which is consumed here.
    ///
    /// Grammar:
    /// `function := "function" identifier? "(" (identifier ("," identifier)*)? ")" ":" (block | expression ";")`
    fn parse_function(&mut self) -> ParseResult<Expr> {
        self.skip_keyword(Keyword::Function)?;

        let name = match self.lexer.peek()? {
            Some(Token::Identifier(name)) => Some(name.clone()),
            _ => None,
        };
        if name.is_some() {
            self.lexer.next()?;
        } else if !self.is_punctuation('(')? {
            return Err(self.unexpected_here(Some("function name or parameters")));
        }

        let parameters = self.delimited('(', ')', ',', true, |parser| {
                                 parser.parse_parameter().map(ListItem::Next)
                             })?;
        self.skip_punctuation(':')?;

        let body = if self.is_punctuation('{')? {
            Expr::Program(self.parse_block(true)?)
        } else {
            let body = self.parse_expression()?;
            self.skip_punctuation(';')?;
            body
        };

        Ok(Expr::Function(Rc::new(FunctionDef { name,
                                                parameters,
                                                body })))
    }

    /// Parses a variable reference and its property chain.
    ///
    /// Grammar: `variable := identifier ("." property)*`
    fn parse_variable(&mut self) -> ParseResult<Expr> {
        let name = match self.lexer.next()? {
            Some(Token::Identifier(name)) => name,
            other => return Err(self.unexpected(other.as_ref(), Some("variable"))),
        };
        let mut properties = Vec::new();
        while self.is_punctuation('.')? {
            self.lexer.next()?;
            properties.push(self.parse_property()?);
        }
        Ok(Expr::Variable { name, properties })
    }

    /// Grammar: `property := identifier ("(" arguments ")")?`
    fn parse_property(&mut self) -> ParseResult<Property> {
        let name = match self.lexer.next()? {
            Some(Token::Identifier(name)) => name,
            other => return Err(self.unexpected(other.as_ref(), Some("property"))),
        };
        let arguments = if self.is_punctuation('(')? {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        Ok(Property { name, arguments })
    }

    fn parse_parameter(&mut self) -> ParseResult<String> {
        match self.lexer.next()? {
            Some(Token::Identifier(name)) => Ok(name),
            other => Err(self.unexpected(other.as_ref(), Some("parameter"))),
        }
    }
}
