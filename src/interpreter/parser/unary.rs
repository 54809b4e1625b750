use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        lexer::{Token, TokenStream},
        parser::{
            binary::parse_exponent,
            core::{ParseResult, parse_expression},
            utils::{expect_closing_paren, parse_argument_list, unexpected},
        },
    },
};

/// Name of the reserved call form that builds a conditional node.
pub const CONDITIONAL_KEYWORD: &str = "if";

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `+`  (identity)
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators nest, so an input like `!-x` is parsed as `!(-x)`.
/// Without a prefix operator the function delegates to [`parse_exponent`].
///
/// Grammar:
/// ```text
///     unary := ("+" | "-" | "!") unary
///            | exponent
/// ```
///
/// Every unary level counts towards the nesting limit of the stream, which
/// bounds the recursion of the whole parser.
pub(crate) fn parse_unary(tokens: &mut TokenStream) -> ParseResult<Expr> {
    tokens.descend()?;
    let expr = parse_prefixed(tokens);
    tokens.ascend();
    expr
}

fn parse_prefixed(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let next = tokens.peek();
    let offset = next.offset;
    let op = match next.token {
        Token::Plus => Some(UnaryOperator::Plus),
        Token::Minus => Some(UnaryOperator::Negate),
        Token::Bang => Some(UnaryOperator::Not),
        _ => None,
    };
    let Some(op) = op else {
        return parse_exponent(tokens);
    };
    tokens.advance();
    let expr = parse_unary(tokens)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       offset })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - numeric literals
/// - variable references
/// - function calls, including the conditional form `if(c, a, b)`
/// - parenthesized expressions
///
/// Grammar (simplified):
/// ```text
///     primary := number
///              | identifier ("(" arguments? ")")?
///              | "(" expression ")"
/// ```
///
/// # Errors
/// Any other token is reported as unexpected at its own offset.
pub(crate) fn parse_primary(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let next = tokens.advance();
    match next.token {
        Token::Number(value) => Ok(Expr::Number { value,
                                                  offset: next.offset }),
        Token::Identifier(name) => parse_identifier_or_function(tokens, name, next.offset),
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect_closing_paren(tokens)?;
            Ok(expr)
        },
        _ => Err(unexpected(&next, "an expression")),
    }
}

/// Parses what follows an identifier: a call when `(` comes next, otherwise a
/// plain variable reference.
///
/// A call named `if` with exactly three arguments becomes an
/// [`Expr::Conditional`]. With any other argument count it stays an ordinary
/// call, which the binder rejects as an arity error.
fn parse_identifier_or_function(tokens: &mut TokenStream,
                                name: String,
                                offset: usize)
                                -> ParseResult<Expr> {
    if !tokens.eat(&Token::LParen) {
        return Ok(Expr::Variable { name, offset });
    }

    let mut arguments = parse_argument_list(tokens)?;

    if name == CONDITIONAL_KEYWORD {
        match <[Expr; 3]>::try_from(arguments) {
            Ok([condition, then_branch, else_branch]) => {
                return Ok(Expr::Conditional { condition: Box::new(condition),
                                              then_branch: Box::new(then_branch),
                                              else_branch: Box::new(else_branch),
                                              offset });
            },
            Err(rest) => arguments = rest,
        }
    }

    Ok(Expr::FunctionCall { name,
                            arguments,
                            offset })
}
