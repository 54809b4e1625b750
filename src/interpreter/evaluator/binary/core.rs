use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Bindings, Context, EvalResult},
        value::core::{encode_bool, truthy},
    },
};

impl Context {
    /// Evaluates a binary operation node.
    ///
    /// `&&` and `||` are handed to [`Context::eval_logic`], which decides
    /// whether the right operand is evaluated at all. Every other operator
    /// evaluates both operands, left first, and applies
    /// [`Context::eval_binary`].
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 offset: usize,
                                 bindings: Option<&Bindings>)
                                 -> EvalResult<f64> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(op, left, right, offset, bindings);
        }

        let left = self.eval(left, bindings)?;
        let right = self.eval(right, bindings)?;
        Self::eval_binary(op, left, right, offset)
    }

    /// Applies a binary operator to two evaluated operands.
    ///
    /// Division and modulo by exactly zero fail at the operator's offset.
    /// Power calls [`Context::eval_pow`]. Relational and equality operators
    /// use [`Context::eval_comparison`]. The logical operators take the truth
    /// view of both operands.
    ///
    /// # Example
    /// ```
    /// use numera::{ast::BinaryOperator, interpreter::evaluator::core::Context};
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, 3.0, 4.0, 1);
    /// assert_eq!(result.unwrap(), 7.0);
    ///
    /// let result = Context::eval_binary(BinaryOperator::Div, 3.0, 0.0, 1);
    /// assert!(result.is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: f64, right: f64, offset: usize) -> EvalResult<f64> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Pow, Sub,
        };

        match op {
            Add => Ok(left + right),
            Sub => Ok(left - right),
            Mul => Ok(left * right),
            Div | Mod if right == 0.0 => Err(RuntimeError::DivisionByZero { offset }),
            Div => Ok(left / right),
            Mod => Ok(left % right),
            Pow => Ok(Self::eval_pow(left, right)),
            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Ok(Self::eval_comparison(op, left, right))
            },
            And => Ok(encode_bool(truthy(left) && truthy(right))),
            Or => Ok(encode_bool(truthy(left) || truthy(right))),
        }
    }
}
