/// Number parsing and formatting helpers.
///
/// Numbers in scripts are always `f64`. These helpers give them the textual
/// form hosts expect when a value is rendered into templated output, and parse
/// number literals the way the lexer reads them.
pub mod num;
