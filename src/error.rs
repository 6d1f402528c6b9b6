/// Parsing errors.
///
/// Defines all error types that can occur while scanning, tokenizing or
/// parsing source code. Every parse error carries the line and column at which
/// it was detected.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors carry no source location; the AST does not retain positions.
pub mod runtime_error;

pub use parse_error::{Location, ParseError};
pub use runtime_error::{ErrorKind, RuntimeError};

/// Any failure produced by the one-shot [`crate::run`] entry point.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program failed while being evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
