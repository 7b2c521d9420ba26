use log::trace;

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{evaluator::scope::Scope, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement. Carries the statement's
    /// value.
    Normal(Value),
    /// A `return` was executed; enclosing blocks unwind up to the function
    /// call.
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the root scope, the stack of
/// child scopes opened by blocks and calls, and the lines printed so far.
///
/// ## Usage
///
/// `Context` is created once and reused for every top-level statement of a
/// program. Child scopes are pushed for the duration of the construct that
/// opens them and are popped again even if evaluation fails.
///
/// ```
/// use checklang::interpreter::{evaluator::core::Context, parser::core::Parser};
///
/// let mut context = Context::new();
/// for statement in Parser::new("var x = 2; printLn(x * 21);").parse_program().unwrap() {
///     context.exec(&statement).unwrap();
/// }
///
/// assert_eq!(context.output(), ["42"]);
/// ```
#[derive(Debug, Default)]
pub struct Context {
    pub(in crate::interpreter::evaluator) root:   Scope,
    pub(in crate::interpreter::evaluator) frames: Vec<Scope>,
    pub(in crate::interpreter::evaluator) output: Vec<String>,
}

impl Context {
    /// Creates a new evaluation context with an empty root scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, variables, arithmetic,
    /// conditionals, array literals, indexing and function calls.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value the expression produces.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        trace!("evaluating expression {:?} at {}", expr.id(), expr.position());

        match expr {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::String { value, .. } => Ok(Value::String(value.clone())),
            Expr::Boolean { value, .. } => Ok(Value::Boolean(*value)),
            Expr::Name { name, pos, .. } => {
                self.get_variable(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                   pos:  *pos, })
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             pos,
                             .. } => self.eval_binary_op(left, *op, right, *pos),
            Expr::Conditional { left,
                                op,
                                right,
                                pos,
                                .. } => self.eval_conditional(left, *op, right, *pos),
            Expr::Array { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::Index { array, index, pos, .. } => self.eval_index(array, index, *pos),
            Expr::FunctionCall { name,
                                 arguments,
                                 pos,
                                 .. } => self.eval_function_call(name, arguments, *pos),
        }
    }

    /// Executes a single statement.
    ///
    /// Handles declarations, assignments, control flow, returns and plain
    /// expression statements. Statements may modify the context or produce
    /// a value.
    ///
    /// # Returns
    /// [`Flow::Return`] if a `return` was executed, directly or inside a
    /// nested block, and [`Flow::Normal`] otherwise.
    pub fn exec(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expr, .. } => Ok(Flow::Normal(self.eval(expr)?)),
            Statement::Initialization { name, value, pos, .. } => {
                let value = self.eval(value)?;
                self.initialize_variable(name, value.clone(), *pos)?;
                Ok(Flow::Normal(value))
            },
            Statement::Assignment { name, value, pos, .. } => {
                let value = self.eval(value)?;
                self.set_variable(name, value.clone(), *pos)?;
                Ok(Flow::Normal(value))
            },
            Statement::IndexAssignment { name,
                                         indexes,
                                         value,
                                         pos,
                                         .. } => {
                Ok(Flow::Normal(self.exec_index_assignment(name, indexes, value, *pos)?))
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => self.exec_if(condition, then_branch, else_branch.as_deref()),
            Statement::While { condition, body, .. } => self.exec_while(condition, body),
            Statement::For { init,
                             condition,
                             step,
                             body,
                             .. } => self.exec_for(init, condition, step, body),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },
            Statement::FunctionDeclaration(def) => {
                self.declare_function(def)?;
                Ok(Flow::Normal(Value::Null))
            },
        }
    }

    /// Executes statements in order until one returns.
    ///
    /// # Returns
    /// The first [`Flow::Return`], or [`Flow::Normal`] carrying the value of
    /// the last statement.
    pub fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        let mut last = Value::Null;
        for statement in statements {
            match self.exec(statement)? {
                Flow::Normal(value) => last = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }

        Ok(Flow::Normal(last))
    }

    /// Runs `f` inside a fresh child scope.
    ///
    /// The scope is popped when `f` finishes, whether or not it failed.
    pub(crate) fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        self.frames.push(Scope::default());
        let result = f(self);
        self.frames.pop();
        result
    }
}
