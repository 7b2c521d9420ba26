use std::{collections::HashMap, rc::Rc};

use log::debug;

use crate::{
    ast::{FunctionDef, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::is_builtin,
        },
        value::core::Value,
    },
};

/// One frame of the scope chain.
///
/// Variables and functions live in separate tables, so a variable and a
/// function may share a name.
#[derive(Debug, Default)]
pub struct Scope {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Rc<FunctionDef>>,
}

impl Context {
    /// Scopes from the innermost to the root.
    fn chain(&self) -> impl Iterator<Item = &Scope> {
        self.frames.iter().rev().chain(std::iter::once(&self.root))
    }

    fn chain_mut(&mut self) -> impl Iterator<Item = &mut Scope> {
        self.frames.iter_mut().rev().chain(std::iter::once(&mut self.root))
    }

    fn current_mut(&mut self) -> &mut Scope {
        self.frames.last_mut().unwrap_or(&mut self.root)
    }

    /// Looks up a variable, starting at the innermost scope.
    ///
    /// # Returns
    /// The value of the nearest binding, or `None` if no scope binds `name`.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.chain().find_map(|scope| scope.variables.get(name))
    }

    /// Binds a new variable in the innermost scope.
    ///
    /// # Errors
    /// `VariableAlreadyDefined` if the innermost scope already binds `name`.
    /// Bindings in outer scopes do not conflict.
    pub fn initialize_variable(&mut self, name: &str, value: Value, pos: Position) -> EvalResult<()> {
        let scope = self.current_mut();
        if scope.variables.contains_key(name) {
            return Err(RuntimeError::VariableAlreadyDefined { name: name.to_string(),
                                                              pos });
        }

        scope.variables.insert(name.to_string(), value);
        Ok(())
    }

    /// Replaces the value of an existing variable.
    ///
    /// The nearest scope that binds `name` is updated, wherever it is in the
    /// chain.
    ///
    /// # Errors
    /// - `UnknownVariable` if no scope binds `name`.
    /// - `TypeChange` if `value` has a different tag than the stored value.
    pub fn set_variable(&mut self, name: &str, value: Value, pos: Position) -> EvalResult<()> {
        let Some(slot) = self.chain_mut().find_map(|scope| scope.variables.get_mut(name)) else {
            return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                       pos });
        };

        if slot.value_type() != value.value_type() {
            return Err(RuntimeError::TypeChange { name: name.to_string(),
                                                  expected: slot.value_type(),
                                                  found: value.value_type(),
                                                  pos });
        }

        *slot = value;
        Ok(())
    }

    /// Looks up a user-defined function, starting at the innermost scope.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.chain().find_map(|scope| scope.functions.get(name)).cloned()
    }

    /// Registers a function in the innermost scope.
    ///
    /// # Errors
    /// - `BuiltinFunctionRedefinition` if `def` uses a built-in's name.
    /// - `FunctionAlreadyDefined` if the innermost scope already declares it.
    pub fn declare_function(&mut self, def: &FunctionDef) -> EvalResult<()> {
        if is_builtin(&def.name) {
            return Err(RuntimeError::BuiltinFunctionRedefinition { name: def.name.clone(),
                                                                   pos:  def.pos, });
        }

        let scope = self.current_mut();
        if scope.functions.contains_key(&def.name) {
            return Err(RuntimeError::FunctionAlreadyDefined { name: def.name.clone(),
                                                              pos:  def.pos, });
        }

        scope.functions.insert(def.name.clone(), Rc::new(def.clone()));
        Ok(())
    }

    /// Appends a line to the program output.
    pub fn emit(&mut self, line: String) {
        debug!("output: {line}");
        self.output.push(line);
    }

    /// The lines printed so far, oldest first.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Moves the printed lines out of the context.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position::new(1, 1);

    #[test]
    fn child_scope_reads_and_assigns_outer_variables() {
        let mut context = Context::new();
        context.initialize_variable("x", Value::from(1.0), POS).unwrap();

        context.scoped(|ctx| {
                   assert_eq!(ctx.get_variable("x"), Some(&Value::from(1.0)));
                   ctx.set_variable("x", Value::from(2.0), POS)
               })
               .unwrap();

        assert_eq!(context.get_variable("x"), Some(&Value::from(2.0)));
    }

    #[test]
    fn child_scope_bindings_do_not_leak() {
        let mut context = Context::new();
        context.scoped(|ctx| ctx.initialize_variable("y", Value::from(true), POS))
               .unwrap();

        assert_eq!(context.get_variable("y"), None);
    }

    #[test]
    fn redeclaration_in_same_scope_fails() {
        let mut context = Context::new();
        context.initialize_variable("x", Value::from(1.0), POS).unwrap();

        let err = context.initialize_variable("x", Value::from(2.0), POS).unwrap_err();
        assert!(matches!(err, RuntimeError::VariableAlreadyDefined { .. }));

        context.scoped(|ctx| ctx.initialize_variable("x", Value::from("inner"), POS))
               .unwrap();
    }

    #[test]
    fn assignment_keeps_the_tag() {
        let mut context = Context::new();
        context.initialize_variable("x", Value::from(1.0), POS).unwrap();

        let err = context.set_variable("x", Value::from("one"), POS).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeChange { .. }));
        assert_eq!(context.get_variable("x"), Some(&Value::from(1.0)));
    }

    #[test]
    fn scope_is_popped_after_failure() {
        let mut context = Context::new();
        let result: EvalResult<()> = context.scoped(|ctx| {
                                                ctx.initialize_variable("t", Value::Null, POS)?;
                                                Err(RuntimeError::DivisionByZero { pos: POS })
                                            });

        assert!(result.is_err());
        assert!(context.frames.is_empty());
    }
}
