use crate::{ast::BinaryOperator, interpreter::value::core::Value};

/// Evaluates `&&` or `||` on two already evaluated operands.
///
/// Only `false` counts as false. `&&` yields `false` when the left operand is
/// `false` and the right operand otherwise; `||` yields the left operand
/// unless it is `false`.
///
/// # Parameters
/// - `operator`: `And` or `Or`.
/// - `left`: Left operand.
/// - `right`: Right operand.
///
/// # Returns
/// One of the operands, never a converted value.
pub(in crate::interpreter::evaluator) fn eval_logic(operator: BinaryOperator,
                                                    left: &Value,
                                                    right: &Value)
                                                    -> Value {
    use BinaryOperator::{And, Or};

    match operator {
        And if left.is_false() => Value::Bool(false),
        And => right.clone(),
        Or if left.is_false() => right.clone(),
        Or => left.clone(),
        _ => unreachable!(),
    }
}
