use thiserror::Error;

use crate::error::ErrorKind;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that does not start any token.
    #[error("Unknown character '{character}'.")]
    UnknownCharacter {
        /// The offending character.
        character: String,
        /// Byte offset of the character.
        offset:    usize,
    },
    /// The input contained no tokens.
    #[error("Empty input.")]
    EmptyInput {
        /// Always the start of the input.
        offset: usize,
    },
    /// Found an unexpected token while parsing.
    #[error("Unexpected token '{token}', expected {expected}.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// What the parser was looking for.
        expected: String,
        /// Byte offset of the token.
        offset:   usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// Byte offset of the end of input.
        offset:   usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Expected closing parenthesis ')' but found '{token}'.")]
    ExpectedClosingParen {
        /// The token found instead.
        token:  String,
        /// Byte offset of the token.
        offset: usize,
    },
    /// The left side of `=` is neither a name nor a function prototype.
    #[error("Invalid assignment target. Examples: x = 2, f(a, b) = a * b")]
    InvalidAssignmentTarget {
        /// Byte offset of the `=` token.
        offset: usize,
    },
    /// Parentheses or prefix operators nested past the parser's limit.
    #[error("Expression nested deeper than {limit} levels.")]
    NestingTooDeep {
        /// The configured limit.
        limit:  usize,
        /// Byte offset of the token that crossed the limit.
        offset: usize,
    },
    /// Found extra tokens after the statement was complete.
    #[error("Extra tokens after statement, starting at '{token}'.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:  String,
        /// Byte offset of the token.
        offset: usize,
    },
}

impl ParseError {
    /// The taxonomy category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownCharacter { .. } => ErrorKind::Lexical,
            _ => ErrorKind::Syntax,
        }
    }

    /// The byte offset the error is anchored at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnknownCharacter { offset, .. }
            | Self::EmptyInput { offset }
            | Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEndOfInput { offset, .. }
            | Self::ExpectedClosingParen { offset, .. }
            | Self::InvalidAssignmentTarget { offset }
            | Self::NestingTooDeep { offset, .. }
            | Self::UnexpectedTrailingTokens { offset, .. } => *offset,
        }
    }
}
