use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{SpannedToken, Token, TokenStream},
        parser::core::{ParseResult, parse_expression},
    },
};

/// Builds the error for a token that cannot extend the current production.
///
/// The end-of-input marker gets its own variant so messages read naturally.
pub(in crate::interpreter::parser) fn unexpected(found: &SpannedToken,
                                                 expected: &str)
                                                 -> ParseError {
    if found.token == Token::End {
        ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                           offset:   found.offset, }
    } else {
        ParseError::UnexpectedToken { token:    found.text.clone(),
                                      expected: expected.to_string(),
                                      offset:   found.offset, }
    }
}

/// Consumes a `)` or reports what was found instead.
pub(in crate::interpreter::parser) fn expect_closing_paren(tokens: &mut TokenStream)
                                                           -> ParseResult<()> {
    if tokens.eat(&Token::RParen) {
        return Ok(());
    }
    let found = tokens.peek();
    if found.token == Token::End {
        return Err(unexpected(found, "')'"));
    }
    Err(ParseError::ExpectedClosingParen { token:  found.text.clone(),
                                           offset: found.offset, })
}

/// Parses a comma-separated list of expressions up to a closing `)`.
///
/// The opening `(` must already be consumed. An immediately encountered `)`
/// produces an empty list.
///
/// Grammar (simplified): `list := (expression ("," expression)*)? ")"`
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an item is followed by anything other than `,` or `)`.
pub(in crate::interpreter::parser) fn parse_argument_list(tokens: &mut TokenStream)
                                                          -> ParseResult<Vec<Expr>> {
    let mut items = Vec::new();
    if tokens.eat(&Token::RParen) {
        return Ok(items);
    }
    loop {
        items.push(parse_expression(tokens)?);
        if tokens.eat(&Token::Comma) {
            continue;
        }
        expect_closing_paren(tokens)?;
        break;
    }
    Ok(items)
}
