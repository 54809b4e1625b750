/// Binary expression parsing.
///
/// One function per precedence level, from logical OR (loosest) down to
/// exponentiation (tightest binary level).
pub mod binary;
/// Core parsing entry points and shared result types.
pub mod core;
/// Statement parsing.
///
/// Distinguishes plain expressions from variable and function definitions.
pub mod statement;
/// Unary and primary expression parsing.
///
/// Handles prefix operators, literals, identifiers, function calls, the
/// conditional form and parenthesized groups.
pub mod unary;
/// Helpers shared by the parsing functions.
pub mod utils;

pub use self::core::{ParseResult, parse_expression, parse_source};
pub use statement::parse_statement;
pub use unary::CONDITIONAL_KEYWORD;
