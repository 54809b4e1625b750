use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{TokenStream, tokenize},
        parser::{binary::parse_logical_or, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy:
///
/// ```text
/// or > and > equality > relational > additive > multiplicative
///    > unary > exponent > primary
/// ```
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the start of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_logical_or(tokens)
}

/// Tokenizes and parses one line of source into a single statement.
///
/// # Errors
/// Any lexical or syntax error of the line.
///
/// # Example
/// ```
/// use numera::{
///     ast::{AssignmentTarget, Statement},
///     interpreter::parser::parse_source,
/// };
///
/// let statement = parse_source("area(w, h) = w * h").unwrap();
/// let Statement::Assignment { target, .. } = statement else { unreachable!() };
///
/// assert_eq!(target,
///            AssignmentTarget::Function { name:   "area".to_string(),
///                                         params: vec!["w".to_string(), "h".to_string()], });
/// ```
pub fn parse_source(source: &str) -> ParseResult<Statement> {
    let mut tokens = tokenize(source)?;
    parse_statement(&mut tokens)
}
