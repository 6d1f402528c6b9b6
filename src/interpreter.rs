/// The scanner module walks source text one character at a time.
///
/// It is the lowest layer of the interpreter and the only one that knows about
/// raw text positions.
///
/// # Responsibilities
/// - Hands out characters with one or more characters of lookahead.
/// - Tracks line and column for error locations.
pub mod scanner;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads characters from the scanner and produces tokens on demand:
/// numbers, strings, keywords, identifiers, punctuation and operator runs.
///
/// # Responsibilities
/// - Skips whitespace and `//` comments.
/// - Keeps one token of lookahead and remembers the last consumed token.
/// - Reports unknown characters with their location.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a recursive descent parser with precedence climbing for
/// binary operators. Every construct of the language is an expression.
///
/// # Responsibilities
/// - Converts tokens into `Expr` nodes grouped in a `Program`.
/// - Reports syntax errors with line and column.
/// - Bounds nesting so hostile input cannot exhaust the stack.
pub mod parser;
/// The environment module implements variable scopes.
///
/// Scopes form a parent-linked chain. The host fills the root scope before
/// evaluation; each script function call runs in a fresh root scope.
///
/// # Responsibilities
/// - Resolves names from the innermost scope outwards.
/// - Enforces final (constant) bindings.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST recursively against an environment.
///
/// # Responsibilities
/// - Evaluates every node kind, including operators, conditionals, blocks and
///   calls.
/// - Dispatches calls to script functions, host functions and host objects.
/// - Reports runtime errors such as division by zero or undefined variables.
pub mod evaluator;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and its equality and display rules.
/// - Defines the host capability types scripts can call into.
pub mod value;
