use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a numeric operator.
///
/// Both operands must be numbers. `/` and `%` fail when the right operand is
/// exactly zero; every other result follows IEEE 754, so overflow produces
/// an infinity rather than an error.
pub(in crate::interpreter::evaluator) fn eval_arithmetic(operator: BinaryOperator,
                                                         left: &Value,
                                                         right: &Value)
                                                         -> EvalResult<Value> {
    use BinaryOperator::{Add, AddAssign, Div, Mod, Mul, Pow, Sub, SubAssign};

    let a = left.as_number()?;
    let b = right.as_number()?;

    let result = match operator {
        Add | AddAssign => a + b,
        Sub | SubAssign => a - b,
        Mul => a * b,
        Div | Mod if b == 0.0 => return Err(RuntimeError::DivisionByZero),
        Div => a / b,
        Mod => a % b,
        Pow => a.powf(b),
        _ => unreachable!(),
    };
    Ok(Value::Number(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arith(operator: BinaryOperator, a: f64, b: f64) -> EvalResult<Value> {
        eval_arithmetic(operator, &Value::Number(a), &Value::Number(b))
    }

    #[test]
    fn basic_operations() {
        assert_eq!(arith(BinaryOperator::Add, 1.0, 1.0).unwrap(), Value::Number(2.0));
        assert_eq!(arith(BinaryOperator::Div, 3.0, 4.0).unwrap(), Value::Number(0.75));
        assert_eq!(arith(BinaryOperator::Mod, -7.0, 3.0).unwrap(), Value::Number(-1.0));
        assert_eq!(arith(BinaryOperator::SubAssign, 5.0, 2.0).unwrap(), Value::Number(3.0));
    }

    #[test]
    fn zero_divisors_fail() {
        assert_eq!(arith(BinaryOperator::Div, 5.0, 0.0), Err(RuntimeError::DivisionByZero));
        assert_eq!(arith(BinaryOperator::Mod, 5.0, -0.0), Err(RuntimeError::DivisionByZero));
        assert_eq!(arith(BinaryOperator::Mul, 5.0, 0.0).unwrap(), Value::Number(0.0));
    }

    #[test]
    fn operands_must_be_numbers() {
        let err = eval_arithmetic(BinaryOperator::Add, &Value::Number(1.0), &Value::Bool(false));
        assert_eq!(err, Err(RuntimeError::ExpectedNumber { found: "false".to_string() }));

        let err = eval_arithmetic(BinaryOperator::Add, &Value::from("a"), &Value::from("b"));
        assert_eq!(err, Err(RuntimeError::ExpectedNumber { found: "a".to_string() }));
    }
}
