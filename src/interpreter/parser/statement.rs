use std::collections::HashSet;

use crate::{
    ast::{AssignmentTarget, Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{SpannedToken, Token, TokenStream},
        parser::{
            core::{ParseResult, parse_expression},
            unary::CONDITIONAL_KEYWORD,
        },
    },
};

/// Parses a single statement and requires that it spans the whole stream.
///
/// A statement is either:
/// - a variable definition, `name = expression`,
/// - a function definition, `name(param, ...) = expression`,
/// - an expression used as a statement.
///
/// The left-hand side is parsed as an ordinary expression first. When an `=`
/// follows, the tokens it was parsed from must spell a bare name or
/// prototype, and the parsed expression is reinterpreted as an assignment
/// target. This keeps the parser free of backtracking.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the expression is malformed,
/// - the left side of `=` is not a name or a prototype whose parameters are
///   distinct bare names,
/// - tokens remain after the statement (this includes a second `=`).
pub fn parse_statement(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let expr = parse_expression(tokens)?;

    let statement = if tokens.peek().token == Token::Equals {
        let offset = tokens.peek().offset;
        if !spells_target(tokens.consumed()) {
            return Err(ParseError::InvalidAssignmentTarget { offset });
        }
        tokens.advance();
        let target = assignment_target(expr, offset)?;
        let value = parse_expression(tokens)?;
        Statement::Assignment { target,
                                value,
                                offset }
    } else {
        Statement::Expression(expr)
    };

    let trailing = tokens.peek();
    if trailing.token != Token::End {
        return Err(ParseError::UnexpectedTrailingTokens { token:  trailing.text.clone(),
                                                          offset: trailing.offset, });
    }

    Ok(statement)
}

/// Whether `tokens` read `name` or `name(param, ...)` with nothing else,
/// parentheses included.
fn spells_target(tokens: &[SpannedToken]) -> bool {
    let is_name = |token: &SpannedToken| matches!(token.token, Token::Identifier(_));
    match tokens {
        [name] => is_name(name),
        [name, open, params @ .., close] => {
            is_name(name)
            && open.token == Token::LParen
            && close.token == Token::RParen
            && (params.is_empty() || params.len() % 2 == 1)
            && params.iter().enumerate().all(|(index, token)| {
                                             if index % 2 == 0 {
                                                 is_name(token)
                                             } else {
                                                 token.token == Token::Comma
                                             }
                                         })
        },
        _ => false,
    }
}

/// Reinterprets a parsed expression as the left-hand side of `=`.
///
/// A conditional on the left is read back as a prototype named `if`, so that
/// the evaluator can reject it as a reserved name.
fn assignment_target(expr: Expr, offset: usize) -> ParseResult<AssignmentTarget> {
    match expr {
        Expr::Variable { name, .. } => Ok(AssignmentTarget::Variable { name }),
        Expr::FunctionCall { name, arguments, .. } => prototype(name, arguments, offset),
        Expr::Conditional { condition,
                            then_branch,
                            else_branch,
                            .. } => prototype(CONDITIONAL_KEYWORD.to_string(),
                                              vec![*condition, *then_branch, *else_branch],
                                              offset),
        _ => Err(ParseError::InvalidAssignmentTarget { offset }),
    }
}

/// Builds a function prototype whose parameters must be distinct bare names.
fn prototype(name: String, arguments: Vec<Expr>, offset: usize) -> ParseResult<AssignmentTarget> {
    let params = arguments.into_iter()
                          .map(|argument| match argument {
                              Expr::Variable { name, .. } => Ok(name),
                              _ => Err(ParseError::InvalidAssignmentTarget { offset }),
                          })
                          .collect::<ParseResult<Vec<String>>>()?;
    let mut seen = HashSet::new();
    if !params.iter().all(|param| seen.insert(param.as_str())) {
        return Err(ParseError::InvalidAssignmentTarget { offset });
    }
    Ok(AssignmentTarget::Function { name, params })
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{AssignmentTarget, Statement},
        error::ParseError,
        interpreter::parser::parse_source,
    };

    #[test]
    fn variable_definition() {
        let Statement::Assignment { target, offset, .. } = parse_source("x = 5").unwrap() else {
            panic!("expected an assignment")
        };
        assert_eq!(target, AssignmentTarget::Variable { name: "x".to_string() });
        assert_eq!(offset, 2);
    }

    #[test]
    fn zero_parameter_function_definition() {
        let Statement::Assignment { target, .. } = parse_source("seven() = 7").unwrap() else {
            panic!("expected an assignment")
        };
        assert_eq!(target,
                   AssignmentTarget::Function { name:   "seven".to_string(),
                                                params: vec![], });
    }

    #[test]
    fn prototype_parameters_must_be_names() {
        assert_eq!(parse_source("f(x + 1) = x"),
                   Err(ParseError::InvalidAssignmentTarget { offset: 9 }));
        assert_eq!(parse_source("f(a, a) = a"),
                   Err(ParseError::InvalidAssignmentTarget { offset: 8 }));
        assert_eq!(parse_source("2 = 3"),
                   Err(ParseError::InvalidAssignmentTarget { offset: 2 }));
    }

    #[test]
    fn parenthesized_targets_are_rejected() {
        assert_eq!(parse_source("(x) = 5"),
                   Err(ParseError::InvalidAssignmentTarget { offset: 4 }));
        assert_eq!(parse_source("f((a)) = a"),
                   Err(ParseError::InvalidAssignmentTarget { offset: 7 }));
        assert_eq!(parse_source("+x = 1"),
                   Err(ParseError::InvalidAssignmentTarget { offset: 3 }));
        assert!(parse_source("f(a, b) = a").is_ok());
    }

    #[test]
    fn chained_assignment_is_rejected() {
        assert!(matches!(parse_source("a = b = 3"),
                         Err(ParseError::UnexpectedTrailingTokens { offset: 6, .. })));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(matches!(parse_source("1 2"),
                         Err(ParseError::UnexpectedTrailingTokens { offset: 2, .. })));
        assert!(matches!(parse_source("(1))"),
                         Err(ParseError::UnexpectedTrailingTokens { offset: 3, .. })));
    }

    #[test]
    fn conditional_on_the_left_reads_as_a_prototype() {
        let Statement::Assignment { target, .. } = parse_source("if(a, b, c) = a").unwrap() else {
            panic!("expected an assignment")
        };
        assert_eq!(target,
                   AssignmentTarget::Function { name:   "if".to_string(),
                                                params: vec!["a".into(), "b".into(), "c".into()], });
    }
}
