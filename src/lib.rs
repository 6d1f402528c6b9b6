//! # embedscript
//!
//! embedscript is a small scripting language meant to be embedded in a host
//! application, typically to let users customize templated output.
//!
//! Source text goes through a scanner, a lexer and a precedence climbing
//! parser into an AST, which a tree-walking evaluator runs against a chain of
//! scopes. The host injects functions, objects and plain values into the root
//! scope before evaluation. Scripts can read members of host objects and call
//! them; nothing else of the host is reachable.
//!
//! ## Example
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use embedscript::{Environment, HostTable, Value, evaluate, parse};
//!
//! let output = Rc::new(RefCell::new(String::new()));
//! let sink = Rc::clone(&output);
//! let content = HostTable::new("content").with_method("set", move |_, args| {
//!                                            *sink.borrow_mut() = args[0].to_string();
//!                                            Ok(Value::Undefined)
//!                                        });
//!
//! let env = Environment::new();
//! env.define("content", content, true);
//! env.define("user", "Ada", true);
//!
//! let source = r#"greeting = if user == "Ada": "hi"; else: "hello"; content.set(greeting)"#;
//! evaluate(&parse(source).unwrap(), &env).unwrap();
//! assert_eq!(*output.borrow(), "hi");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines one variant per language construct; there are no statements
///   separate from expressions.
/// - Renders nodes back to source-like text for error messages.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code.
///
/// # Responsibilities
/// - Defines located syntax errors and unlocated runtime errors.
/// - Classifies runtime errors so hosts can react without matching on text.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together scanning, lexing, parsing, scopes, evaluation and
/// value representations.
///
/// # Responsibilities
/// - Coordinates all core components: scanner, lexer, parser, environment,
///   evaluator and value types.
/// - Exposes the types a host needs to inject bindings.
pub mod interpreter;
/// General utilities shared by several phases.
///
/// # Responsibilities
/// - Parse number literals and format numbers for display.
pub mod util;

pub use crate::{
    ast::Program,
    error::{Error, ErrorKind, ParseError, RuntimeError},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalOptions, Evaluator},
        parser::core::parse,
        value::{
            core::Value,
            host::{HostObject, HostTable, NativeFunction},
        },
    },
};

/// Evaluates a parsed program against `env` with default options.
///
/// Returns the value of the program's last statement, or `false` for an empty
/// program. Host bindings are expected to be defined in `env` beforehand.
///
/// # Errors
/// Returns the first runtime error. There is no recovery inside the
/// language: evaluation stops at the failing node.
///
/// # Examples
/// ```
/// use embedscript::{Environment, Value, evaluate, parse};
///
/// let env = Environment::new();
/// env.define("price", 4.0, true);
///
/// let program = parse("price * 3 / 4").unwrap();
/// assert_eq!(evaluate(&program, &env).unwrap(), Value::Number(3.0));
///
/// let program = parse("price = 1").unwrap();
/// assert!(evaluate(&program, &env).is_err());
/// ```
pub fn evaluate(program: &Program, env: &Environment) -> Result<Value, RuntimeError> {
    Evaluator::new().evaluate(program, env)
}

/// Parses and evaluates `source` in a fresh root environment.
///
/// This is a convenience for scripts that need no host bindings.
///
/// # Errors
/// Returns a parse error if the source is malformed, or the first runtime
/// error raised during evaluation.
///
/// # Examples
/// ```
/// use embedscript::{Error, Value, run};
///
/// assert_eq!(run("3 / 4").unwrap(), Value::Number(0.75));
/// assert!(matches!(run("5 / 0"), Err(Error::Runtime(_))));
/// assert!(matches!(run("5 / "), Err(Error::Parse(_))));
/// ```
pub fn run(source: &str) -> Result<Value, Error> {
    let program = parse(source)?;
    let value = evaluate(&program, &Environment::new())?;
    Ok(value)
}
