use crate::{
    interpreter::value::core::NativeValue,
    util::{
        num::is_integer,
        polynomial::{cubic_roots, quadratic_roots},
    },
};

/// Defines a one-argument builtin that applies an `f64` method.
///
/// The generated function answers `NaN` when it is not given exactly one
/// argument.
///
/// # Example
/// ```
/// use numera::interpreter::{evaluator::function::builtin::sin, value::core::NativeValue};
///
/// let r = sin(&[std::f64::consts::PI / 2.0]);
/// assert_eq!(r, NativeValue::Number(1.0));
/// ```
macro_rules! unary_builtin {
    ($($fname:ident => $method:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $fname(args: &[f64]) -> NativeValue {
                match args {
                    [x] => NativeValue::Number(x.$method()),
                    _ => NativeValue::Number(f64::NAN),
                }
            }
        )*
    };
}

/// Defines a two-argument builtin that applies an `f64` method to the first
/// argument with the second as its parameter.
macro_rules! binary_builtin {
    ($($fname:ident => $method:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $fname(args: &[f64]) -> NativeValue {
                match args {
                    [x, y] => NativeValue::Number(x.$method(*y)),
                    _ => NativeValue::Number(f64::NAN),
                }
            }
        )*
    };
}

unary_builtin! {
    sin   => sin,
    cos   => cos,
    tan   => tan,
    asin  => asin,
    acos  => acos,
    atan  => atan,
    sinh  => sinh,
    cosh  => cosh,
    tanh  => tanh,
    exp   => exp,
    ln    => ln,
    log10 => log10,
    sqrt  => sqrt,
    cbrt  => cbrt,
    abs   => abs,
    floor => floor,
    ceil  => ceil,
    round => round,
    trunc => trunc,
    rad   => to_radians,
    deg   => to_degrees,
}

binary_builtin! {
    atan2 => atan2,
    log   => log,
    min   => min,
    max   => max,
    hypot => hypot,
}

/// The sign of a number: `-1`, `1`, or the argument itself for `0` and `NaN`.
///
/// # Example
/// ```
/// use numera::interpreter::{evaluator::function::builtin::sign, value::core::NativeValue};
///
/// assert_eq!(sign(&[-42.0]), NativeValue::Number(-1.0));
/// assert_eq!(sign(&[0.0]), NativeValue::Number(0.0));
/// ```
#[must_use]
pub fn sign(args: &[f64]) -> NativeValue {
    match args {
        [x] if *x == 0.0 || x.is_nan() => NativeValue::Number(*x),
        [x] => NativeValue::Number(x.signum()),
        _ => NativeValue::Number(f64::NAN),
    }
}

/// Restricts `x` to `[lo, hi]`. An empty or undefined interval gives `NaN`.
#[must_use]
pub fn clamp(args: &[f64]) -> NativeValue {
    match args {
        [x, lo, hi] if lo <= hi => NativeValue::Number(x.clamp(*lo, *hi)),
        _ => NativeValue::Number(f64::NAN),
    }
}

/// Whether the argument is a finite whole number.
#[must_use]
pub fn isint(args: &[f64]) -> NativeValue {
    match args {
        [x] => NativeValue::Boolean(is_integer(*x)),
        _ => NativeValue::Boolean(false),
    }
}

/// Whether the argument is `NaN`, the undefined value.
#[must_use]
pub fn isnan(args: &[f64]) -> NativeValue {
    match args {
        [x] => NativeValue::Boolean(x.is_nan()),
        _ => NativeValue::Boolean(false),
    }
}

/// The `k`-th (1-based) real root of `a x^2 + b x + c`, in ascending order
/// with repeated roots listed once per multiplicity, or `NaN` when there is
/// no such root.
///
/// # Example
/// ```
/// use numera::interpreter::{evaluator::function::builtin::quadroot, value::core::NativeValue};
///
/// assert_eq!(quadroot(&[1.0, -3.0, 2.0, 2.0]), NativeValue::Number(2.0));
/// assert!(quadroot(&[1.0, 0.0, 1.0, 1.0]).into_f64().is_nan());
/// ```
#[must_use]
pub fn quadroot(args: &[f64]) -> NativeValue {
    match args {
        [a, b, c, k] => NativeValue::Number(nth_root(&quadratic_roots(*a, *b, *c), *k)),
        _ => NativeValue::Number(f64::NAN),
    }
}

/// The number of real roots of `a x^2 + b x + c`, counted with multiplicity.
#[must_use]
pub fn quadroots(args: &[f64]) -> NativeValue {
    match args {
        [a, b, c] => NativeValue::Number(root_count(&quadratic_roots(*a, *b, *c))),
        _ => NativeValue::Number(f64::NAN),
    }
}

/// The `k`-th (1-based) real root of `a x^3 + b x^2 + c x + d`, in ascending
/// order with repeated roots listed once per multiplicity, or `NaN` when
/// there is no such root.
#[must_use]
pub fn cubicroot(args: &[f64]) -> NativeValue {
    match args {
        [a, b, c, d, k] => NativeValue::Number(nth_root(&cubic_roots(*a, *b, *c, *d), *k)),
        _ => NativeValue::Number(f64::NAN),
    }
}

/// The number of real roots of `a x^3 + b x^2 + c x + d`, counted with
/// multiplicity.
#[must_use]
pub fn cubicroots(args: &[f64]) -> NativeValue {
    match args {
        [a, b, c, d] => NativeValue::Number(root_count(&cubic_roots(*a, *b, *c, *d))),
        _ => NativeValue::Number(f64::NAN),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn nth_root(roots: &[f64], k: f64) -> f64 {
    if !is_integer(k) || k < 1.0 {
        return f64::NAN;
    }
    roots.get(k as usize - 1).copied().unwrap_or(f64::NAN)
}

#[allow(clippy::cast_precision_loss)]
fn root_count(roots: &[f64]) -> f64 {
    roots.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: NativeValue) -> f64 {
        value.into_f64()
    }

    #[test]
    fn wrong_argument_counts_give_nan() {
        assert!(number(sin(&[])).is_nan());
        assert!(number(hypot(&[1.0])).is_nan());
        assert!(number(clamp(&[1.0, 2.0])).is_nan());
    }

    #[test]
    fn two_argument_builtins_keep_argument_order() {
        assert_eq!(number(hypot(&[3.0, 4.0])), 5.0);
        assert_eq!(number(log(&[8.0, 2.0])), 3.0);
        assert_eq!(number(atan2(&[1.0, 0.0])), std::f64::consts::FRAC_PI_2);
        assert_eq!(number(min(&[2.0, -1.0])), -1.0);
        assert_eq!(number(max(&[2.0, -1.0])), 2.0);
    }

    #[test]
    fn clamp_rejects_inverted_intervals() {
        assert_eq!(number(clamp(&[-3.0, 0.0, 1.0])), 0.0);
        assert_eq!(number(clamp(&[0.5, 0.0, 1.0])), 0.5);
        assert!(number(clamp(&[0.5, 1.0, 0.0])).is_nan());
        assert!(number(clamp(&[0.5, f64::NAN, 1.0])).is_nan());
        assert!(number(clamp(&[f64::NAN, 0.0, 1.0])).is_nan());
    }

    #[test]
    fn predicates_answer_booleans() {
        assert_eq!(isint(&[3.0]), NativeValue::Boolean(true));
        assert_eq!(isint(&[3.5]), NativeValue::Boolean(false));
        assert_eq!(isnan(&[f64::NAN]), NativeValue::Boolean(true));
        assert_eq!(number(isnan(&[1.0])), 0.0);
    }

    #[test]
    fn cubic_root_selection() {
        let roots = [1.0, -6.0, 11.0, -6.0];
        assert_eq!(number(cubicroots(&roots)), 3.0);
        assert!((number(cubicroot(&[1.0, -6.0, 11.0, -6.0, 2.0])) - 2.0).abs() < 1e-12);
        assert!(number(cubicroot(&[1.0, -6.0, 11.0, -6.0, 4.0])).is_nan());
        assert!(number(cubicroot(&[1.0, -6.0, 11.0, -6.0, 1.5])).is_nan());
        assert_eq!(number(quadroots(&[1.0, 0.0, 1.0])), 0.0);
    }

    #[test]
    fn repeated_roots_count_with_multiplicity() {
        assert_eq!(number(quadroots(&[1.0, 2.0, 1.0])), 2.0);
        assert_eq!(number(quadroot(&[1.0, 2.0, 1.0, 2.0])), -1.0);
        // (x - 1)^2 (x + 2)
        assert_eq!(number(cubicroots(&[1.0, 0.0, -3.0, 2.0])), 3.0);
        assert!((number(cubicroot(&[1.0, 0.0, -3.0, 2.0, 3.0])) - 1.0).abs() < 1e-9);
    }
}
