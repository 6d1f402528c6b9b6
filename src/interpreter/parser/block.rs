use crate::{
    ast::{Expr, Program},
    interpreter::{
        lexer::Keyword,
        parser::{
            core::{ParseResult, Parser},
            utils::ListItem,
        },
    },
};

impl Parser<'_> {
    /// Parses a `{ ... }` block.
    ///
    /// Statements may be separated by `;` but do not have to be. When
    /// `allow_return` is set, a `return` statement ends the block: the
    /// returned expression becomes its last statement and every remaining
    /// token up to `}` is discarded unparsed.
    ///
    /// Grammar: `block := "{" (";"? statement)* "}"`
    ///
    /// # Parameters
    /// - `allow_return`: Whether the block is a function body.
    ///
    /// # Errors
    /// Returns a `ParseError` if a statement fails to parse, if `return`
    /// appears where it is not allowed, or if the returned expression is not
    /// followed by `;`.
    pub(in crate::interpreter::parser) fn parse_block(&mut self,
                                                      allow_return: bool)
                                                      -> ParseResult<Program> {
        let statements = self.delimited('{', '}', ';', false, |parser| {
                                 parser.parse_block_statement(allow_return)
                             })?;
        Ok(Program { statements })
    }

    fn parse_block_statement(&mut self, allow_return: bool) -> ParseResult<ListItem<Expr>> {
        if self.is_punctuation(';')? {
            self.lexer.next()?;
        }
        if !self.is_keyword(Keyword::Return)? {
            return self.parse_expression().map(ListItem::Next);
        }
        if !allow_return {
            return Err(self.unexpected_here(None));
        }
        self.lexer.next()?;
        let value = self.parse_expression()?;
        self.skip_punctuation(';')?;
        while !self.lexer.eof()? && !self.is_punctuation('}')? {
            self.lexer.next()?;
        }
        Ok(ListItem::Last(Expr::Return(Box::new(value))))
    }
}
