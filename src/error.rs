use std::fmt;

use crate::ast::Position;

/// Lexing errors.
///
/// Raised by the lexer when the source contains a character that starts no
/// token, or a string literal that never closes.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree:
/// unexpected tokens, premature end of input, malformed literals and
/// statements made unreachable by an earlier `return`.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Each one
/// belongs to one [`ErrorKind`]: name resolution, type enforcement, array
/// indexing, argument counts, or division by zero.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The category of an [`Error`], for hosts that render diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An invalid character or unterminated string.
    Lex,
    /// An unexpected token, grammar violation or unreachable statement.
    Parse,
    /// An undefined or redeclared variable or function.
    Name,
    /// An operand, argument, parameter or element of the wrong type.
    Type,
    /// An array index that is out of bounds or not a whole number.
    Index,
    /// A call with the wrong number of arguments.
    Arity,
    /// Division or remainder by zero.
    Division,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lex => "LexError",
            Self::Parse => "ParseError",
            Self::Name => "NameError",
            Self::Type => "TypeError",
            Self::Index => "IndexError",
            Self::Arity => "ArityError",
            Self::Division => "DivisionError",
        };
        write!(f, "{name}")
    }
}

/// Any error that stops a program.
///
/// This is what [`crate::interpret`] hands back to its caller. It always
/// knows its [`ErrorKind`] and the source position it refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The program could not be lexed or parsed.
    Parse(ParseError),
    /// The program failed while running.
    Runtime(RuntimeError),
}

impl Error {
    /// The category of this error.
    ///
    /// # Example
    /// ```
    /// use checklang::{error::ErrorKind, interpret};
    ///
    /// let err = interpret("printLn(y);").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Name);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Runtime(e) => e.kind(),
        }
    }

    /// The source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Parse(e) => e.position(),
            Self::Runtime(e) => e.position(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Self::Parse(ParseError::Lex(e))
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
