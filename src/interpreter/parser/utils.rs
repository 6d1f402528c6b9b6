use crate::interpreter::parser::core::{ParseResult, Parser};

/// One element produced by a [`Parser::delimited`] item parser.
#[derive(Debug)]
pub(in crate::interpreter::parser) enum ListItem<T> {
    /// An element after which the list may continue.
    Next(T),
    /// The final element; the list stops here even if no closing token
    /// follows yet.
    Last(T),
}

impl Parser<'_> {
    /// Parses a list enclosed by `start` and `stop` with items separated by
    /// `separator`.
    ///
    /// This utility is shared by argument lists, parameter lists and blocks.
    /// It skips `start`, then repeatedly calls `parse_element` until either
    /// the `stop` punctuation is reached or an element reports itself as
    /// [`ListItem::Last`]. Finally `stop` is skipped.
    ///
    /// An immediately encountered `stop` produces an empty list, and a
    /// trailing separator before `stop` is accepted.
    ///
    /// Grammar (simplified): `list := start (item (separator item)*)? separator? stop`
    ///
    /// # Parameters
    /// - `start`: The opening punctuation, e.g. `(` or `{`.
    /// - `stop`: The closing punctuation, e.g. `)` or `}`.
    /// - `separator`: The punctuation between items, e.g. `,` or `;`.
    /// - `separator_required`: When `false`, adjacent items need no separator
    ///   between them.
    /// - `parse_element`: Function used to parse each list element.
    ///
    /// # Returns
    /// A vector of parsed items.
    ///
    /// # Errors
    /// Returns a `ParseError` if:
    /// - `start` or `stop` is missing,
    /// - a required separator is missing,
    /// - an item fails to parse.
    pub(in crate::interpreter::parser) fn delimited<T>(&mut self,
                                                       start: char,
                                                       stop: char,
                                                       separator: char,
                                                       separator_required: bool,
                                                       mut parse_element: impl FnMut(&mut Self) -> ParseResult<ListItem<T>>)
                                                       -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        let mut first = true;
        self.skip_punctuation(start)?;
        while !self.lexer.eof()? {
            if self.is_punctuation(stop)? {
                break;
            }
            if first {
                first = false;
            } else if separator_required || self.is_punctuation(separator)? {
                self.skip_punctuation(separator)?;
            }
            if self.is_punctuation(stop)? {
                break;
            }
            match parse_element(self)? {
                ListItem::Next(item) => items.push(item),
                ListItem::Last(item) => {
                    items.push(item);
                    break;
                },
            }
        }
        self.skip_punctuation(stop)?;
        Ok(items)
    }
}
