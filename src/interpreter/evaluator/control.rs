use crate::{
    ast::{Expr, Statement},
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

impl Context {
    /// Executes an `if` statement.
    ///
    /// The condition and the chosen branch run in one child scope. A
    /// `return` inside the branch is passed on to the caller.
    pub(crate) fn exec_if(&mut self,
                          condition: &Expr,
                          then_branch: &[Statement],
                          else_branch: Option<&[Statement]>)
                          -> EvalResult<Flow> {
        self.scoped(|ctx| {
                if ctx.eval_condition(condition)? {
                    ctx.exec_block(then_branch)
                } else if let Some(statements) = else_branch {
                    ctx.exec_block(statements)
                } else {
                    Ok(Flow::Normal(Value::Null))
                }
            })
    }

    /// Executes a `while` loop.
    ///
    /// The loop owns a single child scope for all of its iterations.
    pub(crate) fn exec_while(&mut self, condition: &Expr, body: &[Statement]) -> EvalResult<Flow> {
        self.scoped(|ctx| {
                while ctx.eval_condition(condition)? {
                    if let flow @ Flow::Return(_) = ctx.exec_block(body)? {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal(Value::Null))
            })
    }

    /// Executes a `for` loop.
    ///
    /// The initializer runs once in the loop's child scope, so the loop
    /// variable is not visible after the loop. The step runs after every
    /// pass through the body.
    pub(crate) fn exec_for(&mut self,
                           init: &Statement,
                           condition: &Expr,
                           step: &Statement,
                           body: &[Statement])
                           -> EvalResult<Flow> {
        self.scoped(|ctx| {
                ctx.exec(init)?;
                while ctx.eval_condition(condition)? {
                    if let flow @ Flow::Return(_) = ctx.exec_block(body)? {
                        return Ok(flow);
                    }
                    ctx.exec(step)?;
                }
                Ok(Flow::Normal(Value::Null))
            })
    }

    fn eval_condition(&mut self, condition: &Expr) -> EvalResult<bool> {
        self.eval(condition)?.as_bool(condition.position())
    }
}
