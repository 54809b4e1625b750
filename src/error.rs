use std::fmt;

/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unknown characters, unexpected tokens, malformed definitions and
/// empty input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while binding and evaluating a
/// statement, such as unresolved names, arity mismatches or division by zero.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The category of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A character that starts no token.
    Lexical,
    /// A malformed statement.
    Syntax,
    /// A name (or name and arity) that is not defined.
    UndefinedSymbol,
    /// A call with the wrong number of arguments.
    Arity,
    /// Division or modulo by exactly zero.
    DivisionByZero,
    /// An attempt to redefine a built-in.
    Redefinition,
    /// A non-boolean operand where type checking requires a boolean.
    Type,
    /// Evaluation nested deeper than the interpreter allows.
    RecursionLimit,
    /// Anything else.
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lexical => "LexicalError",
            Self::Syntax => "SyntaxError",
            Self::UndefinedSymbol => "UndefinedSymbolError",
            Self::Arity => "ArityError",
            Self::DivisionByZero => "DivisionByZeroError",
            Self::Redefinition => "RedefinitionError",
            Self::Type => "TypeError",
            Self::RecursionLimit => "RecursionLimitError",
            Self::Unknown => "UnknownError",
        };
        write!(f, "{name}")
    }
}

/// A structured error as returned from one interpreter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The error category.
    pub kind:     ErrorKind,
    /// Human readable description.
    pub message:  String,
    /// Byte offset in the input line the error is anchored at.
    pub position: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.position, self.message)
    }
}

impl std::error::Error for Diagnostic {}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Self { kind:     error.kind(),
               message:  error.to_string(),
               position: error.offset(), }
    }
}

impl From<RuntimeError> for Diagnostic {
    fn from(error: RuntimeError) -> Self {
        Self { kind:     error.kind(),
               message:  error.to_string(),
               position: error.offset(), }
    }
}
