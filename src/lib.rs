//! # numera
//!
//! numera is a small expression language interpreter written in Rust.
//! It tokenizes, parses and evaluates one statement per line, keeping
//! user-defined variables and functions across lines, with built-in constants
//! and mathematical functions.
//!
//! ## Example
//! ```
//! use numera::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! interpreter.run("hyp(a, b) = sqrt(a ^ 2 + b ^ 2)", false);
//!
//! assert_eq!(interpreter.run("hyp(3, 4)", false).result, Some(5.0));
//! assert_eq!(interpreter.run("2 ^ 3 ^ 2", false).result, Some(512.0));
//! ```

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

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` types that represent the
/// syntactic structure of one input line as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source offsets to AST nodes for error reporting.
/// - Renders trees back to source text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// binding or evaluating a line, and the [`error::Diagnostic`] they are
/// reported as.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source offsets and detailed messages.
/// - Maps every error onto the error taxonomy in [`error::ErrorKind`].
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and session state to provide a complete runtime. It
/// exposes the public API for interpreting input lines.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides the session entry point for running user input.
pub mod interpreter;
/// General numeric utilities.
///
/// This module provides result formatting, literal rendering and the
/// polynomial root solvers used by the built-in library.
pub mod util;

pub use error::{Diagnostic, ErrorKind};
pub use interpreter::session::{Interpreter, Outcome};

/// Runs every line of `source` in a fresh session and returns the value of
/// the last expression line.
///
/// Blank lines are skipped. Execution stops at the first failing line.
///
/// # Errors
/// Returns the diagnostic of the first line that fails to parse or evaluate.
///
/// # Examples
/// ```
/// use numera::get_result;
///
/// let source = "r = 2\narea = PI * r ^ 2\narea / PI";
/// assert_eq!(get_result(source, false).unwrap(), Some(4.0));
///
/// // Example with an intentional error (unknown variable).
/// let source = "y = x + 1"; // 'x' is not defined
/// assert!(get_result(source, false).is_err());
/// ```
pub fn get_result(source: &str, type_checking: bool) -> Result<Option<f64>, Diagnostic> {
    let mut interpreter = Interpreter::new();
    let mut result = None;

    for line in source.lines().filter(|line| !line.trim().is_empty()) {
        let outcome = interpreter.run(line, type_checking);
        if let Some(error) = outcome.error {
            return Err(error);
        }
        if outcome.result.is_some() {
            result = outcome.result;
        }
    }

    Ok(result)
}
