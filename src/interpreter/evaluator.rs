/// Core evaluation logic and context management.
///
/// Contains the runtime context, expression dispatch and statement
/// execution.
pub mod core;

/// Scope management.
///
/// Variable and function tables, name resolution through the scope chain,
/// and the output sequence.
pub mod scope;

/// Arithmetic operator evaluation.
///
/// Implements `+`, `-`, `*`, `/` and `%` on numbers.
pub mod binary;

/// Comparison and logical operator evaluation.
pub mod conditional;

/// Array indexing and index assignment.
pub mod index;

/// Evaluation of control-flow statements.
///
/// `if`, `while` and `for`, each running in a child scope, and the
/// propagation of `return` out of nested blocks.
pub mod control;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
