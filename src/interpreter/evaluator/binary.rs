use crate::{
    ast::{BinaryOperator, Expr, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates an arithmetic operation.
    ///
    /// Both operands are evaluated, left first, and must be numbers. The
    /// operand that is not is named in the error, by variable name if it was
    /// read from one.
    ///
    /// # Errors
    /// - `ExpectedNumber` if either operand is not a number.
    /// - `DivisionByZero` for `/` or `%` with a zero divisor.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 pos: Position)
                                 -> EvalResult<Value> {
        let lhs = self.eval(left)?;
        let rhs = self.eval(right)?;

        let a = lhs.as_number(left.tracked_name(), left.position())?;
        let b = rhs.as_number(right.tracked_name(), right.position())?;

        Ok(Value::Number(eval_arithmetic(op, a, b, pos)?))
    }
}

/// Applies an arithmetic operator to two numbers.
///
/// `%` is the remainder of truncating division, so its sign follows the
/// dividend.
///
/// # Example
/// ```
/// use checklang::{
///     ast::{BinaryOperator, Position},
///     interpreter::evaluator::binary::eval_arithmetic,
/// };
///
/// let pos = Position::new(1, 1);
///
/// assert_eq!(eval_arithmetic(BinaryOperator::Mod, -7.0, 3.0, pos).unwrap(), -1.0);
/// assert!(eval_arithmetic(BinaryOperator::Div, 1.0, 0.0, pos).is_err());
/// ```
pub fn eval_arithmetic(op: BinaryOperator, a: f64, b: f64, pos: Position) -> EvalResult<f64> {
    match op {
        BinaryOperator::Add => Ok(a + b),
        BinaryOperator::Sub => Ok(a - b),
        BinaryOperator::Mul => Ok(a * b),
        BinaryOperator::Div | BinaryOperator::Mod if b == 0.0 => {
            Err(RuntimeError::DivisionByZero { pos })
        },
        BinaryOperator::Div => Ok(a / b),
        BinaryOperator::Mod => Ok(a % b),
    }
}
