/// Comparison operators.
pub mod comparison;
/// Dispatch of binary operators and the arithmetic operators.
pub mod core;
/// The short-circuiting logical operators.
pub mod logic;
/// Exponentiation.
pub mod power;
