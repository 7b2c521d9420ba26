/// Parser state and the expression entry point.
///
/// Owns the lexer, the one-token lookahead buffer and the node id generator.
pub mod core;

/// Comparison and logical operator parsing.
///
/// Handles `||`, `&&` and the six comparison operators, which sit below the
/// arithmetic operators in precedence.
pub mod conditional;

/// Arithmetic operator parsing.
///
/// Implements the additive and multiplicative precedence levels.
pub mod binary;

/// Primary expressions.
///
/// Literals, names, calls, parenthesized expressions, array literals and
/// index suffixes.
pub mod factor;

/// Statement parsing.
///
/// Dispatches on the leading token to control flow, declarations,
/// assignments and expression statements.
pub mod statement;

/// Block parsing.
///
/// Parses brace-delimited statement lists and rejects statements that follow
/// a `return`.
pub mod block;

/// Utility functions for the parser.
pub mod utils;
