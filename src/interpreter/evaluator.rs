/// Core evaluation logic and configuration.
///
/// Contains the `Evaluator`, its options, the node dispatch, and the
/// evaluation of programs, conditionals and assignments.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons and the logical operators, including the
/// storing forms `+=` and `-=`.
pub mod binary;

/// Function evaluation.
///
/// Creates closures from function definitions and invokes script functions,
/// host functions and callable host objects.
pub mod function;

/// Variable and property chain evaluation.
///
/// Resolves a variable and then walks its dotted members, invoking method
/// hops with the receiver they were read from.
pub mod property;
