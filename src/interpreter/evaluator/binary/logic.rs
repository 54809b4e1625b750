use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Bindings, Context, EvalResult},
        value::core::{FALSE, TRUE, encode_bool},
    },
};

impl Context {
    /// Evaluates a logical operation, short-circuiting.
    ///
    /// The left operand is evaluated first. `&&` with a false left operand
    /// and `||` with a true one answer immediately without evaluating the
    /// right operand; otherwise the result is the truth value of the right
    /// operand.
    ///
    /// With type checking enabled both operands must be `0` or `1`.
    pub(crate) fn eval_logic(&mut self,
                             op: BinaryOperator,
                             left: &Expr,
                             right: &Expr,
                             offset: usize,
                             bindings: Option<&Bindings>)
                             -> EvalResult<f64> {
        let left = self.eval(left, bindings)?;
        let left = self.check_boolean(left, offset)?;

        match op {
            BinaryOperator::And if !left => return Ok(FALSE),
            BinaryOperator::Or if left => return Ok(TRUE),
            _ => {},
        }

        let right = self.eval(right, bindings)?;
        Ok(encode_bool(self.check_boolean(right, offset)?))
    }
}
