use crate::{
    ast::{ConditionalOperator, Expr, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a comparison or logical operation.
    ///
    /// Both operands are always evaluated, left first. `&&` and `||` do not
    /// short-circuit.
    ///
    /// # Errors
    /// - `ExpectedBoolean` if an operand of `&&` / `||` is not a boolean.
    /// - `TypeError` / `UnsupportedComparison` for operands that cannot be
    ///   compared with `op`.
    pub(crate) fn eval_conditional(&mut self,
                                   left: &Expr,
                                   op: ConditionalOperator,
                                   right: &Expr,
                                   pos: Position)
                                   -> EvalResult<Value> {
        let lhs = self.eval(left)?;
        let rhs = self.eval(right)?;

        if matches!(op, ConditionalOperator::And | ConditionalOperator::Or) {
            let a = lhs.as_bool(left.position())?;
            let b = rhs.as_bool(right.position())?;
            let result = if op == ConditionalOperator::And { a && b } else { a || b };
            return Ok(Value::Boolean(result));
        }

        compare(op, &lhs, &rhs, pos).map(Value::Boolean)
    }
}

/// Compares two values of the same tag.
///
/// Numbers support all six comparison operators. Strings, booleans and null
/// support only `==` and `!=`. Arrays are not comparable.
///
/// # Errors
/// - `TypeError` if the operands have different tags.
/// - `UnsupportedComparison` if the operator does not apply to the tag.
///
/// # Example
/// ```
/// use checklang::{
///     ast::{ConditionalOperator, Position},
///     interpreter::{evaluator::conditional::compare, value::core::Value},
/// };
///
/// let pos = Position::new(1, 1);
/// let less = compare(ConditionalOperator::LessEqual, &Value::from(2.0), &Value::from(2.0), pos);
/// assert!(less.unwrap());
///
/// let mixed = compare(ConditionalOperator::Equal, &Value::from(1.0), &Value::from("1"), pos);
/// assert!(mixed.is_err());
/// ```
#[allow(clippy::float_cmp)]
pub fn compare(op: ConditionalOperator, lhs: &Value, rhs: &Value, pos: Position) -> EvalResult<bool> {
    use ConditionalOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    match (lhs, rhs, op) {
        (Value::Number(a), Value::Number(b), _) => match op {
            Equal => Ok(a == b),
            NotEqual => Ok(a != b),
            Less => Ok(a < b),
            LessEqual => Ok(a <= b),
            Greater => Ok(a > b),
            GreaterEqual => Ok(a >= b),
            _ => Err(unsupported(op, lhs, rhs, pos)),
        },
        (Value::String(a), Value::String(b), Equal | NotEqual) => Ok((a == b) == (op == Equal)),
        (Value::Boolean(a), Value::Boolean(b), Equal | NotEqual) => {
            Ok((a == b) == (op == Equal))
        },
        (Value::Null, Value::Null, Equal | NotEqual) => Ok(op == Equal),
        _ if lhs.value_type() != rhs.value_type() => {
            Err(RuntimeError::TypeError { details: format!("cannot compare {} with {}",
                                                           lhs.value_type(),
                                                           rhs.value_type()),
                                          pos })
        },
        _ => Err(unsupported(op, lhs, rhs, pos)),
    }
}

fn unsupported(op: ConditionalOperator, lhs: &Value, rhs: &Value, pos: Position) -> RuntimeError {
    RuntimeError::UnsupportedComparison { op,
                                          left: lhs.value_type(),
                                          right: rhs.value_type(),
                                          pos }
}
