use std::fmt;

use crate::util::num::literal_source;

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every node owns its children, so a parsed statement is always a finite tree.
/// Each variant has a fixed arity: literals and variables have no operands,
/// unary operators one, binary operators two and the conditional three. A
/// function call owns one argument expression per actual parameter.
///
/// All nodes carry the byte offset of the token that produced them, which is
/// where diagnostics raised while evaluating the node are anchored.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `42` or `1.5e-3`.
    Number {
        /// The literal value.
        value:  f64,
        /// Offset of the literal in the source.
        offset: usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name:   String,
        /// Offset of the identifier in the source.
        offset: usize,
    },
    /// Function call expression, e.g. `hypot(3, 4)`.
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Actual parameter expressions, in order.
        arguments: Vec<Self>,
        /// Offset of the function name in the source.
        offset:    usize,
    },
    /// A prefix operation (`+x`, `-x`, `!x`).
    UnaryOp {
        /// The unary operator to apply.
        op:     UnaryOperator,
        /// The operand expression.
        expr:   Box<Self>,
        /// Offset of the operator in the source.
        offset: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:   Box<Self>,
        /// The operator.
        op:     BinaryOperator,
        /// Right operand.
        right:  Box<Self>,
        /// Offset of the operator in the source.
        offset: usize,
    },
    /// The conditional `if(condition, then, else)`.
    ///
    /// Only the branch selected by the condition is evaluated.
    Conditional {
        /// The condition expression.
        condition:   Box<Self>,
        /// Expression evaluated when the condition is truthy.
        then_branch: Box<Self>,
        /// Expression evaluated when the condition is falsy.
        else_branch: Box<Self>,
        /// Offset of the `if` keyword in the source.
        offset:      usize,
    },
}

impl Expr {
    /// Gets the source offset from `self`.
    /// ## Example
    /// ```
    /// use numera::ast::Expr;
    ///
    /// let expr = Expr::Variable { name:   "x".to_string(),
    ///                             offset: 5, };
    ///
    /// assert_eq!(expr.offset(), 5);
    /// ```
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Number { offset, .. }
            | Self::Variable { offset, .. }
            | Self::FunctionCall { offset, .. }
            | Self::UnaryOp { offset, .. }
            | Self::BinaryOp { offset, .. }
            | Self::Conditional { offset, .. } => *offset,
        }
    }

    /// Returns the number of operand slots of this node.
    ///
    /// Function calls report the number of actual arguments.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Number { .. } | Self::Variable { .. } => 0,
            Self::FunctionCall { arguments, .. } => arguments.len(),
            Self::UnaryOp { .. } => 1,
            Self::BinaryOp { .. } => 2,
            Self::Conditional { .. } => 3,
        }
    }

    /// Whether the expression reads the variable `name` anywhere.
    #[must_use]
    pub fn references_variable(&self, name: &str) -> bool {
        match self {
            Self::Variable { name: n, .. } => n == name,
            Self::Number { .. } => false,
            Self::FunctionCall { arguments, .. } => {
                arguments.iter().any(|argument| argument.references_variable(name))
            },
            Self::UnaryOp { expr, .. } => expr.references_variable(name),
            Self::BinaryOp { left, right, .. } => {
                left.references_variable(name) || right.references_variable(name)
            },
            Self::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                condition.references_variable(name)
                || then_branch.references_variable(name)
                || else_branch.references_variable(name)
            },
        }
    }

    /// Replaces every reference to the variable `name` with the literal
    /// `value`.
    pub(crate) fn substitute(&mut self, name: &str, value: f64) {
        match self {
            Self::Variable { name: n, offset } if n == name => {
                *self = Self::Number { value,
                                       offset: *offset };
            },
            Self::Number { .. } | Self::Variable { .. } => {},
            Self::FunctionCall { arguments, .. } => {
                for argument in arguments {
                    argument.substitute(name, value);
                }
            },
            Self::UnaryOp { expr, .. } => expr.substitute(name, value),
            Self::BinaryOp { left, right, .. } => {
                left.substitute(name, value);
                right.substitute(name, value);
            },
            Self::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                condition.substitute(name, value);
                then_branch.substitute(name, value);
                else_branch.substitute(name, value);
            },
        }
    }
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentTarget {
    /// `name = ...`
    Variable {
        /// The name being defined.
        name: String,
    },
    /// `name(a, b) = ...`
    Function {
        /// The name being defined.
        name:   String,
        /// The formal parameter names, in order.
        params: Vec<String>,
    },
}

impl AssignmentTarget {
    /// The name being defined.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable { name } | Self::Function { name, .. } => name,
        }
    }
}

/// Represents a top-level statement.
///
/// One line of input parses into exactly one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its result.
    Expression(Expr),
    /// A definition binding a variable or function to an unevaluated body.
    Assignment {
        /// What is being defined.
        target: AssignmentTarget,
        /// The body, kept unevaluated until the identifier is used.
        value:  Expr,
        /// Offset of the `=` token.
        offset: usize,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`), short-circuiting.
    And,
    /// Logical or (`||`), short-circuiting.
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Identity (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`!x`).
    Not,
}

impl BinaryOperator {
    /// Binding power of the operator; larger binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Equal | Self::NotEqual => 3,
            Self::Less | Self::Greater | Self::LessEqual | Self::GreaterEqual => 4,
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div | Self::Mod => 6,
            Self::Pow => 8,
        }
    }

    /// Whether `a op b op c` groups as `a op (b op c)`.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }
}

/// Precedence of prefix operators, between multiplicative and `^`.
const UNARY_PRECEDENCE: u8 = 7;

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "^",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Not => "!",
        };
        write!(f, "{operator}")
    }
}

/// Renders the expression back to source text that parses to the same tree.
///
/// Parentheses are emitted only where precedence or associativity requires
/// them.
///
/// ## Example
/// ```
/// use numera::{ast::Statement, interpreter::parser::parse_source};
///
/// let Statement::Expression(expr) = parse_source("(1 + 2) * 3 ^ (4 ^ 5)").unwrap() else {
///     unreachable!()
/// };
/// assert_eq!(expr.to_string(), "(1 + 2) * 3 ^ 4 ^ 5");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{}", literal_source(*value)),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "{name}(")?;
                write_list(f, arguments)?;
                write!(f, ")")
            },
            Self::UnaryOp { op, expr, .. } => {
                write!(f, "{op}")?;
                write_operand(f, expr, UNARY_PRECEDENCE, false)
            },
            Self::BinaryOp { left, op, right, .. } => {
                let precedence = op.precedence();
                let right_assoc = op.is_right_associative();
                write_operand(f, left, precedence, right_assoc)?;
                write!(f, " {op} ")?;
                write_operand(f, right, precedence, !right_assoc)
            },
            Self::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                write!(f, "if({condition}, {then_branch}, {else_branch})")
            },
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => write!(f, "{expr}"),
            Self::Assignment { target, value, .. } => write!(f, "{target} = {value}"),
        }
    }
}

impl fmt::Display for AssignmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable { name } => write!(f, "{name}"),
            Self::Function { name, params } => write!(f, "{name}({})", params.join(", ")),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Writes an operand, parenthesized when it binds looser than its parent.
///
/// `strict` also parenthesizes operands of equal precedence, which is needed
/// on the side opposite to the operator's associativity.
fn write_operand(f: &mut fmt::Formatter<'_>,
                 operand: &Expr,
                 parent: u8,
                 strict: bool)
                 -> fmt::Result {
    let own = match operand {
        Expr::BinaryOp { op, .. } => op.precedence(),
        Expr::UnaryOp { .. } => UNARY_PRECEDENCE,
        Expr::Number { value, .. } if value.is_sign_negative() => UNARY_PRECEDENCE,
        _ => u8::MAX,
    };
    if own < parent || (strict && own == parent) {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}
