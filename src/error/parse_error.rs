use crate::{
    ast::Position,
    error::{ErrorKind, LexError},
};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The text of the token encountered.
        found:    String,
        /// A description of what the grammar allowed here.
        expected: String,
        /// The source position of the token.
        pos:      Position,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// A description of what the grammar allowed here.
        expected: String,
        /// The source position of the end of input.
        pos:      Position,
    },
    /// A statement follows a `return` in the same statement list.
    UnreachableStatement {
        /// The source position of the unreachable statement.
        pos: Position,
    },
    /// A number literal could not be converted.
    InvalidNumber {
        /// The literal text.
        literal: String,
        /// The source position of the literal.
        pos:     Position,
    },
    /// The lexer rejected the input.
    Lex(LexError),
}

impl ParseError {
    /// The source position of the error.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEndOfInput { pos, .. }
            | Self::UnreachableStatement { pos }
            | Self::InvalidNumber { pos, .. } => *pos,
            Self::Lex(e) => e.position(),
        }
    }

    /// [`ErrorKind::Lex`] for lexer failures, [`ErrorKind::Parse`] otherwise.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lex,
            _ => ErrorKind::Parse,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected, pos } => {
                write!(f, "Error on {pos}: Unexpected token '{found}', expected {expected}.")
            },
            Self::UnexpectedEndOfInput { expected, pos } => {
                write!(f, "Error on {pos}: Unexpected end of input, expected {expected}.")
            },
            Self::UnreachableStatement { pos } => write!(f,
                                                         "Error on {pos}: Unreachable statement after 'return'."),
            Self::InvalidNumber { literal, pos } => {
                write!(f, "Error on {pos}: Invalid number literal '{literal}'.")
            },
            Self::Lex(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            _ => None,
        }
    }
}
