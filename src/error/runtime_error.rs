use thiserror::Error;

use crate::error::ErrorKind;

/// Represents all errors that can occur while binding or evaluating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    #[error("Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name:   String,
        /// Byte offset of the reference.
        offset: usize,
    },
    /// Called a function name that is not defined with any arity.
    #[error("Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name:   String,
        /// Byte offset of the call.
        offset: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Function '{name}' takes {expected} argument(s), but {found} were supplied.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// The accepted argument counts, e.g. `1 or 2`.
        expected: String,
        /// The number of arguments in the call.
        found:    usize,
        /// Byte offset of the call.
        offset:   usize,
    },
    /// Attempted division or modulo by zero.
    #[error("Division by zero.")]
    DivisionByZero {
        /// Byte offset of the operator.
        offset: usize,
    },
    /// Attempted to redefine a built-in constant or function.
    #[error("Cannot redefine built-in '{name}'.")]
    BuiltinRedefinition {
        /// The name of the built-in.
        name:   String,
        /// Byte offset of the definition.
        offset: usize,
    },
    /// A boolean value was expected, but not found.
    #[error("Expected a boolean (0 or 1) but found {found}.")]
    ExpectedBoolean {
        /// The offending value.
        found:  String,
        /// Byte offset of the operator consuming the value.
        offset: usize,
    },
    /// Evaluation nested too deeply.
    #[error("Maximum evaluation depth of {limit} exceeded.")]
    RecursionLimit {
        /// The configured limit.
        limit:  usize,
        /// Byte offset of the expression that crossed the limit.
        offset: usize,
    },
    /// Any other failure.
    #[error("{details}")]
    Other {
        /// Description of the failure.
        details: String,
        /// Byte offset the failure is attributed to.
        offset:  usize,
    },
}

impl RuntimeError {
    /// The taxonomy category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownVariable { .. } | Self::UnknownFunction { .. } => {
                ErrorKind::UndefinedSymbol
            },
            Self::ArgumentCountMismatch { .. } => ErrorKind::Arity,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::BuiltinRedefinition { .. } => ErrorKind::Redefinition,
            Self::ExpectedBoolean { .. } => ErrorKind::Type,
            Self::RecursionLimit { .. } => ErrorKind::RecursionLimit,
            Self::Other { .. } => ErrorKind::Unknown,
        }
    }

    /// The byte offset the error is anchored at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnknownVariable { offset, .. }
            | Self::UnknownFunction { offset, .. }
            | Self::ArgumentCountMismatch { offset, .. }
            | Self::DivisionByZero { offset }
            | Self::BuiltinRedefinition { offset, .. }
            | Self::ExpectedBoolean { offset, .. }
            | Self::RecursionLimit { offset, .. }
            | Self::Other { offset, .. } => *offset,
        }
    }
}
