/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks statements and expressions against a stack of scopes,
/// enforces the runtime type rules, dispatches built-in and user functions,
/// and collects the lines a program prints.
///
/// # Responsibilities
/// - Evaluates every expression and statement variant.
/// - Resolves names through the scope chain and enforces tag stability.
/// - Reports runtime errors such as division by zero or bad indices.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces tokens on demand, each
/// carrying its text and the line and column it starts on. String literals
/// are scanned through an explicit quote state.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source location.
/// - Classifies identifiers as keywords, names or call names.
/// - Reports lexical errors for invalid characters or open strings.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser pulls tokens from the lexer and constructs statements and
/// expressions by recursive descent, one grammar rule per function.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar and rejects statements made unreachable by `return`.
/// - Assigns every node a deterministic id.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Values are numbers, strings, booleans, arrays and null. Every value has a
/// fixed [`value::core::ValueType`] tag that assignment never changes.
pub mod value;
