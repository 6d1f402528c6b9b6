/// Core parser state and entry points.
///
/// Holds the `Parser` struct, the public `parse` function, the top-level
/// statement loop and the token expectation helpers shared by every other
/// parser module.
pub mod core;

/// Binary operator parsing.
///
/// Implements precedence climbing over the operator table, producing
/// `Binary` and `Assign` nodes.
pub mod binary;

/// Atom parsing.
///
/// Parses the operands of binary expressions: literals, parenthesized
/// expressions, blocks, `if`, `final`, `function` and variables with their
/// property chains.
pub mod atom;

/// Block parsing.
///
/// Parses `{ ... }` statement sequences, including `return` inside function
/// bodies.
pub mod block;

/// Utility functions for the parser.
///
/// Provides the delimited list helper used by argument lists, parameter
/// lists and blocks.
pub mod utils;
