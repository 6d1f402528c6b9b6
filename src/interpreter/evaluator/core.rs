use log::debug;

use crate::{
    ast::{ElseIf, Expr, LiteralValue, Program},
    error::RuntimeError,
    interpreter::{environment::Environment, parser::core::MAX_NESTING, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default maximum evaluation depth.
///
/// Matches the parser's height bound, so every parsed program evaluates under
/// the default options unless its function calls nest.
pub const DEFAULT_MAX_DEPTH: usize = MAX_NESTING;

/// Tunables for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// How deeply nodes may nest during evaluation, counting through function
    /// calls. Exceeding it fails with `RecursionLimit`.
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl EvalOptions {
    /// Returns the options with `max_depth` replaced.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// How a node's result is going to be used.
///
/// A named function in definition mode binds itself in the current scope and
/// yields `undefined`; in value mode it only produces the closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The node is a statement.
    Definition,
    /// The node produces an operand, argument, callee or assigned value.
    Value,
}

/// A tree-walking evaluator.
///
/// The evaluator holds no program state of its own: variables live in the
/// [`Environment`] passed to [`Evaluator::evaluate`]. It only tracks how deep
/// the current evaluation is nested.
///
/// ## Example
/// ```
/// use embedscript::{
///     Environment, parse,
///     interpreter::{
///         evaluator::core::{EvalOptions, Evaluator},
///         value::core::Value,
///     },
/// };
///
/// let program = parse("a = 1; a += 2; a").unwrap();
/// let mut evaluator = Evaluator::with_options(EvalOptions::default().with_max_depth(64));
/// let result = evaluator.evaluate(&program, &Environment::new()).unwrap();
/// assert_eq!(result, Value::Number(3.0));
/// ```
#[derive(Debug, Default)]
pub struct Evaluator {
    options: EvalOptions,
    depth:   usize,
}

impl Evaluator {
    /// Creates an evaluator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with the given options.
    #[must_use]
    pub const fn with_options(options: EvalOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Evaluates a program in `env` and returns the value of its last
    /// statement, or `false` for an empty program.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised. Bindings made before the
    /// failure stay in `env`.
    pub fn evaluate(&mut self, program: &Program, env: &Environment) -> EvalResult<Value> {
        debug!("evaluating program with {} statements", program.statements.len());
        self.depth = 0;
        self.eval_program(program, env)
    }

    /// Evaluates a single expression as a statement.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        self.eval_in(expr, env, Mode::Definition)
    }

    /// Evaluates an expression whose result is used as a value.
    pub(in crate::interpreter::evaluator) fn eval_value(&mut self,
                                                        expr: &Expr,
                                                        env: &Environment)
                                                        -> EvalResult<Value> {
        self.eval_in(expr, env, Mode::Value)
    }

    /// Evaluates an expression in the given mode.
    ///
    /// This is the node dispatch; every other evaluation routine recurses
    /// through here, which is where nesting depth is checked.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: Scope in which names are resolved.
    /// - `mode`: Whether the expression is a statement or a value.
    ///
    /// # Returns
    /// The value the expression produced.
    pub fn eval_in(&mut self, expr: &Expr, env: &Environment, mode: Mode) -> EvalResult<Value> {
        if self.depth >= self.options.max_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.options.max_depth });
        }
        self.depth += 1;
        let result = self.dispatch(expr, env, mode);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, expr: &Expr, env: &Environment, mode: Mode) -> EvalResult<Value> {
        match expr {
            Expr::Literal(value) => Ok(Self::eval_literal(value)),
            Expr::Variable { name, properties } => self.eval_variable(name, properties, env),
            Expr::Call { callee, arguments } => self.eval_call(callee, arguments, env),
            Expr::Binary { operator,
                           left,
                           right, } => self.eval_binary_op(*operator, left, right, env),
            Expr::Assign { left,
                           right,
                           is_final, } => self.eval_assign(left, right, *is_final, env),
            Expr::If { condition,
                       then_branch,
                       else_ifs,
                       else_branch, } => {
                self.eval_if(condition, then_branch, else_ifs, else_branch.as_deref(), env, mode)
            },
            Expr::Program(program) => self.eval_program(program, env),
            Expr::Function(def) => Ok(Self::eval_function(def, env, mode)),
            Expr::Return(value) => self.eval_value(value, env),
        }
    }

    fn eval_literal(value: &LiteralValue) -> Value {
        Value::from(value)
    }

    /// Evaluates statements in order in `env` itself; blocks do not open a
    /// scope.
    ///
    /// A `return` statement yields its value and ends the block.
    fn eval_program(&mut self, program: &Program, env: &Environment) -> EvalResult<Value> {
        let mut result = Value::Bool(false);
        for statement in &program.statements {
            if let Expr::Return(value) = statement {
                return self.eval_value(value, env);
            }
            result = self.eval(statement, env)?;
        }
        Ok(result)
    }

    /// Takes the first branch whose condition is not `false`.
    ///
    /// Yields `false` when no branch matched and there is no `else`.
    fn eval_if(&mut self,
               condition: &Expr,
               then_branch: &Expr,
               else_ifs: &[ElseIf],
               else_branch: Option<&Expr>,
               env: &Environment,
               mode: Mode)
               -> EvalResult<Value> {
        if !self.eval_value(condition, env)?.is_false() {
            return self.eval_in(then_branch, env, mode);
        }
        for clause in else_ifs {
            if !self.eval_value(&clause.condition, env)?.is_false() {
                return self.eval_in(&clause.then, env, mode);
            }
        }
        match else_branch {
            Some(branch) => self.eval_in(branch, env, mode),
            None => Ok(Value::Bool(false)),
        }
    }

    /// `final name = value` defines a constant in `env` itself, shadowing any
    /// outer binding. A plain assignment goes through `Environment::set`.
    fn eval_assign(&mut self,
                   left: &Expr,
                   right: &Expr,
                   is_final: bool,
                   env: &Environment)
                   -> EvalResult<Value> {
        let name = assignment_target(left)?;
        let value = self.eval_value(right, env)?;
        if is_final {
            Ok(env.define(name, value, true))
        } else {
            env.set(name, value)
        }
    }
}

/// Returns the variable name an assignment stores into.
///
/// # Errors
/// Returns `InvalidAssignmentTarget` unless `target` is a variable without
/// properties.
pub(in crate::interpreter::evaluator) fn assignment_target(target: &Expr) -> EvalResult<&str> {
    match target {
        Expr::Variable { name, properties } if properties.is_empty() => Ok(name.as_str()),
        _ => Err(RuntimeError::InvalidAssignmentTarget { target: target.to_string() }),
    }
}
