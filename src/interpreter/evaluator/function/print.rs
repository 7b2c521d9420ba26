use crate::{
    ast::Position,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Argument, Value},
    },
};

/// Renders every argument and appends the result as one output line.
///
/// Strings are written verbatim, numbers and booleans in their textual form,
/// null as `null` and arrays as `[a, b, c]`. Nothing separates the
/// arguments.
///
/// # Returns
/// `Value::Null`.
pub fn print_ln(context: &mut Context, args: &[Argument], _: Position) -> EvalResult<Value> {
    context.emit(render(args));
    Ok(Value::Null)
}

/// Renders every argument like [`print_ln`] and returns the joined string.
///
/// # Example
/// ```
/// use checklang::{
///     ast::Position,
///     interpreter::{
///         evaluator::{core::Context, function::print::concat},
///         value::core::{Argument, Value},
///     },
/// };
///
/// let args = [Argument { value: Value::from("n = "),
///                        name:  None, },
///             Argument { value: Value::from(3.0),
///                        name:  Some("n".to_string()), }];
/// let joined = concat(&mut Context::new(), &args, Position::new(1, 1)).unwrap();
///
/// assert_eq!(joined, Value::from("n = 3"));
/// ```
pub fn concat(_: &mut Context, args: &[Argument], _: Position) -> EvalResult<Value> {
    Ok(Value::String(render(args)))
}

fn render(args: &[Argument]) -> String {
    args.iter().map(|arg| arg.value.to_string()).collect()
}
