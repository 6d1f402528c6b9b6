use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

/// Binding power of every operator that may appear between two atoms.
///
/// Operator runs not listed here (`!`, `&`, `**`, ...) end the expression.
const PRECEDENCE: &[(&str, u8)] = &[("=", 1),
                                    ("||", 2),
                                    ("&&", 3),
                                    ("<", 7),
                                    (">", 7),
                                    ("<=", 7),
                                    (">=", 7),
                                    ("==", 7),
                                    ("!=", 7),
                                    ("+", 10),
                                    ("-", 10),
                                    ("+=", 10),
                                    ("-=", 10),
                                    ("*", 20),
                                    ("/", 20),
                                    ("%", 20)];

/// Returns the binding power of an operator, or `None` if it cannot join two
/// operands.
///
/// # Example
/// ```
/// use embedscript::interpreter::parser::binary::precedence;
///
/// assert_eq!(precedence("*"), Some(20));
/// assert_eq!(precedence("="), Some(1));
/// assert_eq!(precedence("**"), None);
/// ```
#[must_use]
pub fn precedence(symbol: &str) -> Option<u8> {
    PRECEDENCE.iter()
              .find(|(candidate, _)| *candidate == symbol)
              .map(|(_, power)| *power)
}

impl Parser<'_> {
    /// Extends `left` with binary operators binding tighter than
    /// `min_precedence`.
    ///
    /// Each operator's right operand is parsed at that operator's own
    /// precedence, so chains of equal precedence fold to the left:
    /// `1 - 2 - 3` is `(1 - 2) - 3`. Assignment is the exception and nests
    /// to the right, so `a = b = 1` assigns `1` to both.
    ///
    /// Every fold makes the tree one level taller, so a long chain such as
    /// `1 + 1 + ... + 1` fails with `NestingTooDeep` once its height passes
    /// [`MAX_NESTING`].
    ///
    /// Grammar: `binary := atom (operator atom)*`
    ///
    /// [`MAX_NESTING`]: crate::interpreter::parser::core::MAX_NESTING
    pub(in crate::interpreter::parser) fn maybe_binary(&mut self,
                                                       mut left: Expr,
                                                       min_precedence: u8)
                                                       -> ParseResult<Expr> {
        let mut height = left.height();
        loop {
            let symbol = match self.lexer.peek()? {
                Some(Token::Operator(symbol)) => symbol.clone(),
                _ => return Ok(left),
            };
            let Some(power) = precedence(&symbol) else {
                return Ok(left);
            };
            if power <= min_precedence {
                return Ok(left);
            }
            let operator_token = self.lexer.next()?;

            let is_assignment = symbol == "=";
            let right_precedence = if is_assignment { power - 1 } else { power };
            let right = self.nested(|parser| {
                                let atom = parser.parse_atom()?;
                                parser.maybe_binary(atom, right_precedence)
                            })?;
            height = height.max(right.height()) + 1;
            self.check_height(height)?;

            left = if is_assignment {
                Expr::Assign { left:     Box::new(left),
                               right:    Box::new(right),
                               is_final: false, }
            } else {
                let operator = BinaryOperator::from_symbol(&symbol).ok_or_else(|| {
                                   self.unexpected(operator_token.as_ref(), Some("binary operator"))
                               })?;
                Expr::Binary { operator,
                               left: Box::new(left),
                               right: Box::new(right) }
            };
        }
    }
}
