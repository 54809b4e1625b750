use std::collections::HashMap;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::symbol_table::{Closure, SymbolKey, SymbolTable},
        value::core::{is_boolean, truthy},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Parameter bindings of the function call being evaluated.
pub type Bindings = HashMap<String, f64>;

/// Maximum number of nested expression evaluations.
///
/// Every node being evaluated counts, including the nodes of called function
/// bodies and of lazy variable bodies, so this bounds the evaluator's stack
/// use whatever the shape of the program.
pub const MAX_EVAL_DEPTH: usize = 10_000;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the symbol table with every
/// built-in and user-defined identifier, the type checking flag of the current
/// run, the current evaluation depth and the variable values computed by the
/// statement being evaluated.
///
/// ## Usage
///
/// `Context` is created once and reused for evaluating successive statements.
/// All evaluation methods (like [`Context::eval`] and
/// [`Context::eval_statement`]) access this state to resolve variables and
/// functions.
///
/// ## Example
/// ```
/// use numera::{
///     ast::Statement,
///     interpreter::{evaluator::core::Context, parser::parse_source},
/// };
///
/// let mut context = Context::new();
/// let Statement::Expression(expr) = parse_source("2 + 3 * 4").unwrap() else {
///     unreachable!()
/// };
///
/// assert_eq!(context.eval(&expr, None).unwrap(), 14.0);
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    /// All identifiers known to the session.
    pub symbols:       SymbolTable,
    /// Whether logical operands must be exactly `0` or `1`.
    pub type_checking: bool,
    depth:             usize,
    /// Lazy variable values computed during the current statement, by table
    /// position. They reach the table only when the statement succeeds.
    pending:           HashMap<usize, f64>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a new evaluation context holding only the built-ins.
    #[must_use]
    pub fn new() -> Self {
        Self { symbols:       SymbolTable::with_builtins(),
               type_checking: false,
               depth:         0,
               pending:       HashMap::new(), }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant, so that the logical operators and
    /// the conditional decide themselves which operands are evaluated.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `bindings`: Parameter bindings when evaluating a function body.
    ///
    /// # Errors
    /// Besides the errors of the individual nodes, evaluating deeper than
    /// [`MAX_EVAL_DEPTH`] nested nodes fails at the node that crosses the
    /// limit.
    pub fn eval(&mut self, expr: &Expr, bindings: Option<&Bindings>) -> EvalResult<f64> {
        self.nested(expr.offset(), |context| context.dispatch(expr, bindings))
    }

    fn dispatch(&mut self, expr: &Expr, bindings: Option<&Bindings>) -> EvalResult<f64> {
        match expr {
            Expr::Number { value, .. } => Ok(*value),
            Expr::Variable { name, offset } => self.eval_variable(name, *offset, bindings),
            Expr::FunctionCall { name,
                                 arguments,
                                 offset, } => {
                self.eval_function_call(name, arguments, *offset, bindings)
            },
            Expr::UnaryOp { op, expr, offset } => {
                self.eval_unary_op(*op, expr, *offset, bindings)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             offset, } => self.eval_binary_op(left, *op, right, *offset, bindings),
            Expr::Conditional { condition,
                                then_branch,
                                else_branch,
                                offset, } => {
                self.eval_conditional(condition, then_branch, else_branch, *offset, bindings)
            },
        }
    }

    /// Resolves a variable reference.
    ///
    /// Parameter bindings shadow the symbol table. A variable still holding
    /// its unevaluated body is evaluated once per statement; the value is
    /// kept pending until [`Context::settle`] decides its fate.
    pub(crate) fn eval_variable(&mut self,
                                name: &str,
                                offset: usize,
                                bindings: Option<&Bindings>)
                                -> EvalResult<f64> {
        if let Some(value) = bindings.and_then(|bindings| bindings.get(name)) {
            return Ok(*value);
        }

        let position =
            self.symbols
                .position(&SymbolKey::variable(name))
                .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                               offset })?;
        if let Some(value) = self.pending.get(&position) {
            return Ok(*value);
        }

        let entry = self.symbols.entry(position);
        match entry.closure() {
            Closure::Ast(body) => {
                let body = body.clone();
                let value = self.eval(&body, None)?;
                self.pending.insert(position, value);
                Ok(value)
            },
            Closure::Native(_) | Closure::Empty => Ok(entry.value()),
        }
    }

    /// Ends the lazy evaluations of a statement.
    ///
    /// When the statement succeeded the computed variable values are cached
    /// in the table, otherwise they are dropped and the table is exactly as
    /// before the statement.
    pub(crate) fn settle(&mut self, succeeded: bool) {
        if succeeded {
            for (position, value) in self.pending.drain() {
                self.symbols.cache(position, value);
            }
        } else {
            self.pending.clear();
        }
    }

    /// Drops the state of an evaluation that was interrupted without
    /// unwinding through [`Context::eval`].
    pub(crate) fn abandon(&mut self) {
        self.depth = 0;
        self.pending.clear();
    }

    /// Evaluates `if(condition, then, else)`, touching only the selected
    /// branch.
    fn eval_conditional(&mut self,
                        condition: &Expr,
                        then_branch: &Expr,
                        else_branch: &Expr,
                        offset: usize,
                        bindings: Option<&Bindings>)
                        -> EvalResult<f64> {
        let condition = self.eval(condition, bindings)?;
        if self.check_boolean(condition, offset)? {
            self.eval(then_branch, bindings)
        } else {
            self.eval(else_branch, bindings)
        }
    }

    /// Takes the boolean view of a value.
    ///
    /// With type checking enabled only `0` and `1` are accepted.
    pub(crate) fn check_boolean(&self, value: f64, offset: usize) -> EvalResult<bool> {
        if self.type_checking && !is_boolean(value) {
            return Err(RuntimeError::ExpectedBoolean { found: value.to_string(),
                                                       offset });
        }
        Ok(truthy(value))
    }

    /// Runs `eval` one level deeper, failing once [`MAX_EVAL_DEPTH`] is
    /// reached.
    pub(crate) fn nested<T>(&mut self,
                            offset: usize,
                            eval: impl FnOnce(&mut Self) -> EvalResult<T>)
                            -> EvalResult<T> {
        if self.depth >= MAX_EVAL_DEPTH {
            return Err(RuntimeError::RecursionLimit { limit: MAX_EVAL_DEPTH,
                                                      offset });
        }
        self.depth += 1;
        let result = eval(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::Statement,
        interpreter::{evaluator::symbol_table::Identifier, parser::parse_source},
    };

    fn eval(context: &mut Context, source: &str) -> EvalResult<f64> {
        let Ok(Statement::Expression(expr)) = parse_source(source) else {
            panic!("'{source}' is not an expression");
        };
        context.eval(&expr, None)
    }

    #[test]
    fn conditional_skips_the_untaken_branch() {
        let mut context = Context::new();
        assert_eq!(eval(&mut context, "if(1, 2, 1 / 0)"), Ok(2.0));
        assert_eq!(eval(&mut context, "if(0, 1 / 0, 3)"), Ok(3.0));
        assert_eq!(eval(&mut context, "if(0.5, 4, 5)"), Ok(4.0));
    }

    #[test]
    fn type_checking_rejects_non_boolean_conditions() {
        let mut context = Context::new();
        context.type_checking = true;
        assert_eq!(eval(&mut context, "if(2, 1, 0)"),
                   Err(RuntimeError::ExpectedBoolean { found:  "2".to_string(),
                                                       offset: 0, }));
        assert_eq!(eval(&mut context, "if(1 < 2, 7, 8)"), Ok(7.0));
    }

    #[test]
    fn depth_is_restored_after_failure() {
        let mut context = Context::new();
        let result = context.nested(3, |context| {
                                let inner: EvalResult<f64> =
                                    Err(RuntimeError::DivisionByZero { offset: 1 });
                                assert_eq!(context.depth, 1);
                                inner
                            });
        assert!(result.is_err());
        assert_eq!(context.depth, 0);
    }

    #[test]
    fn depth_limit_is_reported_at_the_call() {
        let mut context = Context::new();
        context.depth = MAX_EVAL_DEPTH;
        assert_eq!(context.nested(9, |_| Ok(1.0)),
                   Err(RuntimeError::RecursionLimit { limit:  MAX_EVAL_DEPTH,
                                                      offset: 9, }));
    }

    #[test]
    fn every_node_counts_towards_the_depth() {
        let mut context = Context::new();
        context.depth = MAX_EVAL_DEPTH - 2;
        assert_eq!(eval(&mut context, "-1"), Ok(-1.0));
        assert_eq!(eval(&mut context, "--1"),
                   Err(RuntimeError::RecursionLimit { limit:  MAX_EVAL_DEPTH,
                                                      offset: 2, }));
        assert_eq!(context.depth, MAX_EVAL_DEPTH - 2);
    }

    #[test]
    fn lazy_values_stay_pending_until_settled() {
        let mut context = Context::new();
        context.symbols.add(Identifier::variable("x".into(),
                                                 Expr::Number { value:  4.0,
                                                                offset: 4, }));
        let position = context.symbols.position(&SymbolKey::variable("x")).unwrap();

        assert_eq!(eval(&mut context, "x"), Ok(4.0));
        context.settle(false);
        assert!(matches!(context.symbols.entry(position).closure(), Closure::Ast(_)));

        assert_eq!(eval(&mut context, "x"), Ok(4.0));
        context.settle(true);
        assert!(matches!(context.symbols.entry(position).closure(), Closure::Empty));
        assert_eq!(context.symbols.entry(position).value(), 4.0);
    }
}
