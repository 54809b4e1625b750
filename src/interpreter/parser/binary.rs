use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Token, TokenStream},
        parser::{
            core::ParseResult,
            unary::{parse_primary, parse_unary},
        },
    },
};

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents a binary operator
/// and `None` for all other tokens.
///
/// # Example
/// ```
/// use numera::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Bang), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::DoubleAmpersand => Some(BinaryOperator::And),
        Token::DoublePipe => Some(BinaryOperator::Or),
        _ => None,
    }
}

/// Parses one left-associative precedence level.
///
/// Loops while the next token is one of the level's operators, folding the
/// already-parsed operand and the next operand into a `BinaryOp` node.
fn parse_left_assoc(tokens: &mut TokenStream,
                    accepts: fn(BinaryOperator) -> bool,
                    operand: fn(&mut TokenStream) -> ParseResult<Expr>)
                    -> ParseResult<Expr> {
    let mut left = operand(tokens)?;
    loop {
        let next = tokens.peek();
        if let Some(op) = token_to_binary_operator(&next.token)
           && accepts(op)
        {
            let offset = next.offset;
            tokens.advance();
            let right = operand(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    offset };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// Grammar: `logical_or := logical_and ("||" logical_and)*`
pub fn parse_logical_or(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_assoc(tokens,
                     |op| matches!(op, BinaryOperator::Or),
                     parse_logical_and)
}

/// Parses logical AND expressions.
///
/// Grammar: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_assoc(tokens,
                     |op| matches!(op, BinaryOperator::And),
                     parse_equality)
}

/// Parses `==` and `!=`.
///
/// Grammar: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_assoc(tokens,
                     |op| matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual),
                     parse_relational)
}

/// Parses ordering comparisons.
///
/// Grammar: `relational := additive (("<" | "<=" | ">" | ">=") additive)*`
pub fn parse_relational(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_assoc(tokens,
                     |op| {
                         matches!(op,
                                  BinaryOperator::Less
                                  | BinaryOperator::LessEqual
                                  | BinaryOperator::Greater
                                  | BinaryOperator::GreaterEqual)
                     },
                     parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_assoc(tokens,
                     |op| matches!(op, BinaryOperator::Add | BinaryOperator::Sub),
                     parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_assoc(tokens,
                     |op| {
                         matches!(op,
                                  BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
                     },
                     parse_unary)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ^ b ^ c` parses as `a ^ (b ^ c)`.
/// The exponent may carry its own prefix operators, so `2 ^ -1` is accepted,
/// while a prefix operator in front of the base applies to the whole power:
/// `-2 ^ 2` is `-(2 ^ 2)`.
///
/// The rule is: `exponent := primary ("^" unary)?`
pub fn parse_exponent(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let base = parse_primary(tokens)?;
    let next = tokens.peek();
    if next.token == Token::Caret {
        let offset = next.offset;
        tokens.advance();
        let exponent = parse_unary(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(base),
                                   op: BinaryOperator::Pow,
                                   right: Box::new(exponent),
                                   offset });
    }
    Ok(base)
}
