use std::fmt;

use log::debug;

use crate::{
    ast::{Expr, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            function::{array, print},
        },
        value::core::{Argument, Value},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the context, the evaluated arguments and the call
/// position. Arity has already been checked when it runs.
type BuiltinFn = fn(&mut Context, &[Argument], Position) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `AtLeast(n)` means the builtin accepts `n` or more arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all built-in functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "printLn"  => { arity: Arity::AtLeast(1), func: print::print_ln },
    "concat"   => { arity: Arity::AtLeast(1), func: print::concat },
    "index"    => { arity: Arity::Exact(2), func: array::index },
    "setIndex" => { arity: Arity::Exact(3), func: array::set_index },
    "push"     => { arity: Arity::Exact(2), func: array::push },
    "pop"      => { arity: Arity::Exact(1), func: array::pop },
    "length"   => { arity: Arity::Exact(1), func: array::length },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Returns `true` if `name` is a built-in function.
///
/// # Example
/// ```
/// use checklang::interpreter::evaluator::function::core::is_builtin;
///
/// assert!(is_builtin("printLn"));
/// assert!(!is_builtin("println"));
/// ```
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

impl Context {
    /// Evaluates a function call.
    ///
    /// Built-ins take precedence over user functions. For both, the
    /// arguments are evaluated in a fresh child scope.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `pos`: Call position for error reporting.
    ///
    /// # Returns
    /// The function result or an error if lookup, arity or types fail.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Expr],
                                     pos: Position)
                                     -> EvalResult<Value> {
        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) {
            let args = self.scoped(|ctx| ctx.eval_arguments(arguments))?;
            if !builtin.arity.check(args.len()) {
                return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                                 expected: builtin.arity
                                                                                  .to_string(),
                                                                 found: args.len(),
                                                                 pos });
            }
            return (builtin.func)(self, &args, pos);
        }

        self.scoped(|ctx| ctx.call_user_defined_function(name, arguments, pos))
    }

    /// Executes a user-defined function inside the current (call) scope.
    ///
    /// The argument count and every argument's tag are checked against the
    /// declaration before any parameter is bound or any statement of the body
    /// runs.
    ///
    /// # Errors
    /// - Unknown function name.
    /// - Wrong number of arguments.
    /// - An argument whose tag differs from its parameter's declared type.
    ///
    /// # Returns
    /// The value of the first `return` reached, or null.
    fn call_user_defined_function(&mut self,
                                  name: &str,
                                  arguments: &[Expr],
                                  pos: Position)
                                  -> EvalResult<Value> {
        let args = self.eval_arguments(arguments)?;

        let func = self.get_function(name)
                       .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                                      pos })?;

        if args.len() != func.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: func.params
                                                                           .len()
                                                                           .to_string(),
                                                             found: args.len(),
                                                             pos });
        }

        for (param, arg) in func.params.iter().zip(&args) {
            let expected = param.param_type.value_type();
            if arg.value.value_type() != expected {
                return Err(RuntimeError::ParameterTypeMismatch { function: name.to_string(),
                                                                 parameter: param.name.clone(),
                                                                 expected,
                                                                 found: arg.value.value_type(),
                                                                 pos });
            }
        }

        debug!("calling '{name}' at {pos} with {} argument(s)", args.len());

        for (param, arg) in func.params.iter().zip(args) {
            self.initialize_variable(&param.name, arg.value, param.pos)?;
        }

        match self.exec_block(&func.body)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal(_) => Ok(Value::Null),
        }
    }

    fn eval_arguments(&mut self, arguments: &[Expr]) -> EvalResult<Vec<Argument>> {
        let mut args = Vec::with_capacity(arguments.len());
        for expr in arguments {
            args.push(Argument { value: self.eval(expr)?,
                                 name:  expr.tracked_name().map(str::to_string), });
        }
        Ok(args)
    }
}

/// Views a checked argument slice as a fixed-size array.
///
/// # Errors
/// `ArgumentCountMismatch` if the slice does not hold exactly `N` arguments.
pub(in crate::interpreter::evaluator::function) fn exact_args<'a, const N: usize>(
    name: &str,
    args: &'a [Argument],
    pos: Position)
    -> EvalResult<&'a [Argument; N]> {
    args.try_into()
        .map_err(|_| RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                           expected: N.to_string(),
                                                           found: args.len(),
                                                           pos })
}
