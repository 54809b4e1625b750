use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::core::{Bindings, Context, EvalResult},
        value::core::encode_bool,
    },
};

impl Context {
    /// Evaluates a prefix operation.
    ///
    /// Supported operators:
    /// - `Plus`: identity.
    /// - `Negate`: arithmetic negation.
    /// - `Not`: complement of the operand's truth value. With type checking
    ///   enabled the operand must be `0` or `1`.
    ///
    /// # Example
    /// ```
    /// use numera::{
    ///     ast::Statement,
    ///     interpreter::{evaluator::core::Context, parser::parse_source},
    /// };
    ///
    /// let mut context = Context::new();
    /// let Statement::Expression(expr) = parse_source("!-0").unwrap() else {
    ///     unreachable!()
    /// };
    ///
    /// assert_eq!(context.eval(&expr, None).unwrap(), 1.0);
    /// ```
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                offset: usize,
                                bindings: Option<&Bindings>)
                                -> EvalResult<f64> {
        let value = self.eval(expr, bindings)?;

        match op {
            UnaryOperator::Plus => Ok(value),
            UnaryOperator::Negate => Ok(-value),
            UnaryOperator::Not => Ok(encode_bool(!self.check_boolean(value, offset)?)),
        }
    }
}
