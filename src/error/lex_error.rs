use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while splitting source into tokens.
pub enum LexError {
    /// A character that does not start any token.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Where it was found.
        pos:       Position,
    },
    /// A string literal whose closing quote is missing.
    UnterminatedString {
        /// Position of the first character after the opening quote.
        pos: Position,
    },
    /// A `/*` comment whose `*/` is missing.
    UnterminatedComment {
        /// Position of the opening `/*`.
        pos: Position,
    },
}

impl LexError {
    /// The source position of the error.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::InvalidCharacter { pos, .. }
            | Self::UnterminatedString { pos }
            | Self::UnterminatedComment { pos } => *pos,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { character, pos } => {
                write!(f, "Error on {pos}: Invalid character '{character}'.")
            },
            Self::UnterminatedString { pos } => {
                write!(f, "Error on {pos}: String literal is never closed.")
            },
            Self::UnterminatedComment { pos } => {
                write!(f, "Error on {pos}: Comment is never closed.")
            },
        }
    }
}

impl std::error::Error for LexError {}
