/// Built-in function implementations.
///
/// Every function takes the evaluated arguments as a slice of doubles and
/// answers with a number or a boolean.
pub mod builtin;

/// The built-in registration table and function call evaluation.
pub mod core;
