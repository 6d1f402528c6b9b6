use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates an ordering or equality operator.
///
/// Ordering requires two numbers. Equality never coerces: values of
/// different types are unequal, and functions and objects are equal only to
/// themselves.
pub(in crate::interpreter::evaluator) fn eval_comparison(operator: BinaryOperator,
                                                         left: &Value,
                                                         right: &Value)
                                                         -> EvalResult<Value> {
    use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    let result = match operator {
        Equal => left.strict_equals(right),
        NotEqual => !left.strict_equals(right),
        Less => left.as_number()? < right.as_number()?,
        Greater => left.as_number()? > right.as_number()?,
        LessEqual => left.as_number()? <= right.as_number()?,
        GreaterEqual => left.as_number()? >= right.as_number()?,
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}
