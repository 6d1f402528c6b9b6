/// Binary operator dispatch.
pub mod core;

/// Numeric operators: `+ - * / % **` and the storing `+=` / `-=`.
pub mod arithmetic;

/// Ordering and equality operators.
pub mod comparison;

/// `&&` and `||`.
pub mod logic;
