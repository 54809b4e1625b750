use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::Context, value::core::encode_bool},
};

impl Context {
    /// Evaluates a comparison of the form `left <operator> right`.
    ///
    /// The doubles are compared exactly and the outcome is encoded as `1` or
    /// `0`. Any comparison involving `NaN` is false, except `!=`.
    ///
    /// # Example
    /// ```
    /// use numera::{ast::BinaryOperator, interpreter::evaluator::core::Context};
    ///
    /// assert_eq!(Context::eval_comparison(BinaryOperator::Less, 3.0, 5.0), 1.0);
    /// assert_eq!(Context::eval_comparison(BinaryOperator::Equal, 3.0, 5.0), 0.0);
    /// ```
    #[must_use]
    pub fn eval_comparison(op: BinaryOperator, left: f64, right: f64) -> f64 {
        #[allow(clippy::float_cmp)]
        let result = match op {
            BinaryOperator::Less => left < right,
            BinaryOperator::Greater => left > right,
            BinaryOperator::LessEqual => left <= right,
            BinaryOperator::GreaterEqual => left >= right,
            BinaryOperator::Equal => left == right,
            BinaryOperator::NotEqual => left != right,
            _ => false,
        };
        encode_bool(result)
    }
}
