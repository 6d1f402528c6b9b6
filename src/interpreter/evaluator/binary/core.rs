use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        environment::Environment,
        evaluator::{
            binary::{arithmetic::eval_arithmetic, comparison::eval_comparison, logic::eval_logic},
            core::{EvalResult, Evaluator, assignment_target},
        },
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a binary expression.
    ///
    /// Both operands are always evaluated, left first, including for `&&`
    /// and `||`. The storing operators `+=` and `-=` then write the result
    /// back into the variable on the left.
    ///
    /// # Parameters
    /// - `operator`: The operator.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    /// - `env`: Scope for operand evaluation and for the store.
    ///
    /// # Returns
    /// The operator's result, which for `+=` / `-=` is also the stored value.
    pub(in crate::interpreter::evaluator) fn eval_binary_op(&mut self,
                                                            operator: BinaryOperator,
                                                            left: &Expr,
                                                            right: &Expr,
                                                            env: &Environment)
                                                            -> EvalResult<Value> {
        let store = match operator {
            BinaryOperator::AddAssign | BinaryOperator::SubAssign => {
                Some(assignment_target(left)?)
            },
            _ => None,
        };

        let lhs = self.eval_value(left, env)?;
        let rhs = self.eval_value(right, env)?;
        let result = apply_operator(operator, &lhs, &rhs)?;

        match store {
            Some(name) => env.set(name, result),
            None => Ok(result),
        }
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// This routes the operation to specialized handlers:
/// arithmetic operators (including `+=`, `-=` and `**`) use
/// `eval_arithmetic`, ordering and equality use `eval_comparison`, and the
/// logical operators use `eval_logic`. Storing is not done here.
///
/// # Parameters
/// - `operator`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
///
/// # Returns
/// An `EvalResult<Value>` containing the evaluated result.
///
/// # Example
/// ```
/// use embedscript::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::apply_operator, value::core::Value},
/// };
///
/// let result = apply_operator(BinaryOperator::Pow, &Value::Number(2.0), &Value::Number(10.0));
/// assert_eq!(result.unwrap(), Value::Number(1024.0));
///
/// let result = apply_operator(BinaryOperator::Or, &Value::Bool(false), &Value::from("x"));
/// assert_eq!(result.unwrap(), Value::from("x"));
/// ```
pub fn apply_operator(operator: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use BinaryOperator::{
        Add, AddAssign, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul,
        NotEqual, Or, Pow, Sub, SubAssign,
    };

    match operator {
        Add | Sub | Mul | Div | Mod | Pow | AddAssign | SubAssign => {
            eval_arithmetic(operator, left, right)
        },
        Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
            eval_comparison(operator, left, right)
        },
        And | Or => Ok(eval_logic(operator, left, right)),
    }
}
