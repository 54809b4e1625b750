/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons, exponentiation and the short-circuiting
/// logical operators.
pub mod binary;

/// Name resolution performed before a statement is evaluated.
///
/// Checks every variable reference and function call against the symbol
/// table, so that malformed statements fail before they have any effect.
pub mod binding;

/// Core evaluation logic and context management.
///
/// Contains the evaluation dispatch, the runtime context, lazy variable
/// resolution and the evaluation depth bound.
pub mod core;

/// Function evaluation.
///
/// Handles user-defined and native function calls and the built-in
/// registration table.
pub mod function;

/// Evaluation of top-level statements and definitions.
pub mod statement;

/// Storage of user-defined and built-in identifiers.
pub mod symbol_table;

/// Unary operator evaluation logic.
pub mod unary;
