/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator binds every name of a statement against the symbol table,
/// then walks the tree, evaluating expressions and installing definitions. It
/// is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Resolves variables and functions by name and arity before evaluation.
/// - Evaluates AST nodes with per-node control over operand evaluation, so
///   that `&&`, `||` and `if(...)` short-circuit.
/// - Reports runtime errors such as division by zero or unbounded recursion.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads one line of source text and produces a stream
/// of tokens, each corresponding to a number, an identifier, an operator or a
/// delimiter, terminated by an explicit end marker. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their source
///   offsets.
/// - Reports lexical errors for characters that start no token.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of one statement.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, definitions).
/// - Validates correct grammar and syntax, reporting errors with their offset.
/// - Encodes operator precedence and associativity in the tree shape.
pub mod parser;
/// The session module ties lexing, parsing and evaluation together.
///
/// An [`session::Interpreter`] owns the state accumulated across successive
/// input lines and turns every failure into a [`crate::error::Diagnostic`].
pub mod session;
/// The value module defines the runtime encoding of values.
///
/// Every value is a double; booleans are encoded as `1` and `0`. Complex
/// numbers only appear as intermediates of exponentiation.
pub mod value;
