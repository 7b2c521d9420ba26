//! # checklang
//!
//! checklang is a lexer, parser and tree-walking evaluator for Check, a small
//! imperative scripting language with numbers, strings, booleans, arrays,
//! lexical scopes and typed user functions.
//!
//! The whole pipeline is behind [`interpret`]: it takes program text and
//! returns the printed lines, or the first error together with its kind and
//! source position.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use log::trace;

use crate::{
    error::Error,
    interpreter::{
        evaluator::core::{Context, Flow},
        parser::core::Parser,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions and node ids to every node.
/// - Provides the deterministic node id generator used by the parser.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running a
/// program. Every error carries the source position it refers to and maps to
/// one [`error::ErrorKind`].
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line and column numbers and detailed messages.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion.
pub mod util;

/// The result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    /// Every line printed by `printLn`, in order.
    pub lines: Vec<String>,
    /// The value of the last top-level statement, or null for an empty
    /// program.
    pub value: Value,
}

/// Runs a program and collects what it prints.
///
/// Statements are parsed and evaluated one at a time against a single root
/// scope. The first error stops the program, and so does a `return` reached
/// outside any function, even inside a loop or `if`; its value becomes the
/// program's value.
///
/// # Errors
/// Returns the first lexing, parsing or runtime error.
///
/// # Examples
/// ```
/// use checklang::{error::ErrorKind, interpret};
///
/// let output = interpret("var x = 2; var y = 3; printLn(x + y * 2);").unwrap();
/// assert_eq!(output.lines, ["8"]);
///
/// // `x` is not defined.
/// let err = interpret("var y = x + 1;").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Name);
/// ```
pub fn interpret(source: &str) -> Result<Output, Error> {
    let mut context = Context::new();
    let value = run(source, &mut context)?;

    Ok(Output { lines: context.take_output(),
                value })
}

/// Runs a program against an existing context.
///
/// Unlike [`interpret`], the context outlives the run, so the lines printed
/// before a failure stay available through [`Context::output`].
///
/// # Errors
/// Returns the first lexing, parsing or runtime error.
pub fn run(source: &str, context: &mut Context) -> Result<Value, Error> {
    let mut parser = Parser::new(source);
    let mut value = Value::Null;

    while !parser.at_end()? {
        let statement = parser.parse_statement()?;
        trace!("executing statement {:?} at {}", statement.id(), statement.position());
        match context.exec(&statement)? {
            Flow::Normal(result) => value = result,
            Flow::Return(result) => return Ok(result),
        }
    }

    Ok(value)
}
