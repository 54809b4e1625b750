use crate::interpreter::{evaluator::core::Context, value::complex::ComplexNumber};

impl Context {
    /// Evaluates an exponentiation.
    ///
    /// - Any exponent of zero gives `1`, except `0 ^ 0`, which is undefined
    ///   (`NaN`).
    /// - A negative base with a finite non-integer exponent is raised on the
    ///   principal branch in the complex plane and the real part of the
    ///   result is taken.
    /// - Everything else is ordinary real exponentiation.
    ///
    /// # Example
    /// ```
    /// use numera::interpreter::evaluator::core::Context;
    ///
    /// assert_eq!(Context::eval_pow(2.0, 10.0), 1024.0);
    /// assert_eq!(Context::eval_pow(-2.0, 3.0), -8.0);
    /// assert!(Context::eval_pow(0.0, 0.0).is_nan());
    ///
    /// // The principal cube root of -8 is 1 + 1.732i.
    /// assert!((Context::eval_pow(-8.0, 1.0 / 3.0) - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn eval_pow(base: f64, exponent: f64) -> f64 {
        if exponent == 0.0 {
            return if base == 0.0 { f64::NAN } else { 1.0 };
        }

        if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
            return ComplexNumber::from(base).powf(exponent).real;
        }

        base.powf(exponent)
    }
}
