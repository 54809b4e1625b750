use std::fmt;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14` or `2.1e-10`.
    ///
    /// A `.` or exponent marker is only part of the number when digits
    /// follow it, so `1.` lexes as `1` followed by a lone `.`.
    #[regex(r"[0-9]+", parse_number)]
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_number)]
    Number(f64),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `,`
    #[token(",")]
    Comma,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// End of input. Never produced by the scanner itself; [`tokenize`]
    /// appends it after the last real token.
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Number(n) => return write!(f, "{n}"),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::DoubleAmpersand => "&&",
            Self::DoublePipe => "||",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Bang => "!",
            Self::Equals => "=",
            Self::Comma => ",",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::End => "end of input",
        };
        write!(f, "{text}")
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value. Literals too large for `f64` become
///   infinity.
/// - `None`: If the token slice is not a valid float.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// A token together with its source text and byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    /// The token kind and payload.
    pub token:  Token,
    /// The exact source text of the token (empty for [`Token::End`]).
    pub text:   String,
    /// Byte offset of the first character of the token.
    pub offset: usize,
}

/// Maximum number of unary levels (parenthesized groups, prefix operators and
/// exponent operands) the parser nests into.
pub const MAX_NESTING: usize = 256;

/// An ordered, end-terminated sequence of tokens consumed through a single
/// forward cursor.
///
/// The stream always ends with a [`Token::End`] marker, so [`peek`] never runs
/// out: once the cursor reaches the marker it stays there.
///
/// [`peek`]: TokenStream::peek
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<SpannedToken>,
    cursor: usize,
    depth:  usize,
}

impl TokenStream {
    fn new(mut tokens: Vec<SpannedToken>, end: usize) -> Self {
        tokens.push(SpannedToken { token:  Token::End,
                                   text:   String::new(),
                                   offset: end, });
        Self { tokens,
               cursor: 0,
               depth: 0 }
    }

    /// Returns the token under the cursor without consuming it.
    #[must_use]
    pub fn peek(&self) -> &SpannedToken {
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    /// Consumes and returns the token under the cursor.
    ///
    /// The end marker is returned again on every call once reached.
    pub fn advance(&mut self) -> SpannedToken {
        let token = self.peek().clone();
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
        token
    }

    /// Consumes the next token if it equals `expected`.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if &self.peek().token == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Whether the cursor sits on the end marker.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.peek().token == Token::End
    }

    /// Enters one more nesting level at the token under the cursor.
    ///
    /// # Errors
    /// [`ParseError::NestingTooDeep`] once [`MAX_NESTING`] levels are open.
    pub fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit:  MAX_NESTING,
                                                    offset: self.peek().offset, });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves the level opened by the matching [`TokenStream::descend`].
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// The tokens before the cursor.
    #[must_use]
    pub fn consumed(&self) -> &[SpannedToken] {
        &self.tokens[..self.cursor]
    }

    /// The tokens of the stream, end marker included.
    #[must_use]
    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }
}

/// Converts source text into a [`TokenStream`].
///
/// Whitespace is skipped. Two-character operators win over their
/// one-character prefixes.
///
/// # Errors
/// - [`ParseError::UnknownCharacter`] at the offset of the first character
///   that starts no token.
/// - [`ParseError::EmptyInput`] when the input contains no tokens at all.
///
/// # Example
/// ```
/// use numera::interpreter::lexer::{Token, tokenize};
///
/// let stream = tokenize("x <= 1.5e-3").unwrap();
/// let kinds: Vec<_> = stream.tokens().iter().map(|t| t.token.clone()).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Identifier("x".into()),
///                 Token::LessEqual,
///                 Token::Number(1.5e-3),
///                 Token::End]);
/// ```
pub fn tokenize(source: &str) -> Result<TokenStream, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let offset = lexer.span().start;
        match token {
            Ok(token) => tokens.push(SpannedToken { token,
                                                    text: lexer.slice().to_string(),
                                                    offset }),
            Err(()) => {
                return Err(ParseError::UnknownCharacter { character: lexer.slice().to_string(),
                                                          offset });
            },
        }
    }

    if tokens.is_empty() {
        return Err(ParseError::EmptyInput { offset: 0 });
    }

    Ok(TokenStream::new(tokens, source.len()))
}
