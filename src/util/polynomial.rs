use std::f64::consts::TAU;

/// Number of Newton refinement steps applied to every root.
pub const NEWTON_ITERATIONS: usize = 8;
/// A Newton step smaller than this ends refinement early.
pub const NEWTON_TOLERANCE: f64 = 1e-14;
/// Leading coefficients and discriminants below this magnitude count as zero.
pub const EPSILON: f64 = 1e-12;

/// Returns the real roots of `a x^2 + b x + c` in ascending order.
///
/// A vanishing `a` degrades to the linear case. A repeated root is reported
/// as many times as its multiplicity. The degenerate equation `0 = c` has no
/// roots reported.
///
/// ## Example
/// ```
/// use numera::util::polynomial::quadratic_roots;
///
/// assert_eq!(quadratic_roots(1.0, -3.0, 2.0), vec![1.0, 2.0]);
/// assert_eq!(quadratic_roots(1.0, 2.0, 1.0), vec![-1.0, -1.0]);
/// assert!(quadratic_roots(1.0, 0.0, 1.0).is_empty());
/// ```
#[must_use]
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < EPSILON {
        return linear_root(b, c).into_iter().collect();
    }

    let (p, q) = (b / a, c / a);
    let discriminant = p.mul_add(p, -4.0 * q);

    let roots = if discriminant > EPSILON {
        // Avoid cancellation: take the larger-magnitude root first.
        let s = -0.5 * (p + discriminant.sqrt().copysign(p));
        if s == 0.0 { vec![0.0] } else { vec![s, q / s] }
    } else if discriminant >= -EPSILON {
        vec![-p / 2.0; 2]
    } else {
        Vec::new()
    };

    finish(roots, &[a, b, c])
}

/// Returns the real roots of `a x^3 + b x^2 + c x + d` in ascending order,
/// repeated roots once per multiplicity.
///
/// The cubic is reduced to the depressed form `t^3 + p t + q` and split on
/// the sign of its discriminant: one real root (Cardano), a repeated root, or
/// three real roots through the trigonometric substitution. A vanishing `a`
/// degrades to [`quadratic_roots`].
///
/// ## Example
/// ```
/// use numera::util::polynomial::cubic_roots;
///
/// let roots = cubic_roots(1.0, -6.0, 11.0, -6.0);
/// assert_eq!(roots.len(), 3);
/// assert!((roots[0] - 1.0).abs() < 1e-12);
/// assert!((roots[2] - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn cubic_roots(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a.abs() < EPSILON {
        return quadratic_roots(b, c, d);
    }

    let (b, c, d) = (b / a, c / a, d / a);
    let shift = b / 3.0;
    let p = c - b * shift;
    let q = 2.0 * shift.powi(3) - shift * c + d;
    let discriminant = (q / 2.0).powi(2) + (p / 3.0).powi(3);

    let depressed = if discriminant > EPSILON {
        let root = discriminant.sqrt();
        vec![(-q / 2.0 + root).cbrt() + (-q / 2.0 - root).cbrt()]
    } else if discriminant >= -EPSILON {
        if p.abs() < EPSILON {
            vec![0.0; 3]
        } else {
            let double = -3.0 * q / (2.0 * p);
            vec![3.0 * q / p, double, double]
        }
    } else {
        let m = 2.0 * (-p / 3.0).sqrt();
        let theta = (3.0 * q / (p * m)).clamp(-1.0, 1.0).acos() / 3.0;
        (0..3).map(|k| m * (theta - TAU * f64::from(k) / 3.0).cos())
              .collect()
    };

    let roots = depressed.into_iter().map(|t| t - shift).collect();
    finish(roots, &[1.0, b, c, d])
}

fn linear_root(b: f64, c: f64) -> Option<f64> {
    (b.abs() >= EPSILON).then(|| -c / b)
}

/// Refines and sorts candidate roots.
fn finish(roots: Vec<f64>, coefficients: &[f64]) -> Vec<f64> {
    let mut roots: Vec<f64> = roots.into_iter()
                                   .map(|root| newton(root, coefficients))
                                   .collect();
    roots.sort_by(f64::total_cmp);
    roots
}

/// Polishes a root with a fixed number of Newton steps.
///
/// Stops early once a step falls below [`NEWTON_TOLERANCE`] or the derivative
/// vanishes (a repeated root).
fn newton(mut x: f64, coefficients: &[f64]) -> f64 {
    for _ in 0..NEWTON_ITERATIONS {
        let (value, slope) = evaluate(coefficients, x);
        if slope.abs() < EPSILON {
            break;
        }
        let step = value / slope;
        if !step.is_finite() {
            break;
        }
        x -= step;
        if step.abs() < NEWTON_TOLERANCE {
            break;
        }
    }
    x
}

/// Horner evaluation of a polynomial and its derivative.
fn evaluate(coefficients: &[f64], x: f64) -> (f64, f64) {
    coefficients.iter()
                .fold((0.0, 0.0), |(value, slope), &k| (value.mul_add(x, k), slope.mul_add(x, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roots(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn quadratic_cases() {
        assert_roots(&quadratic_roots(2.0, -2.0, -12.0), &[-2.0, 3.0]);
        assert_roots(&quadratic_roots(1.0, 0.0, 0.0), &[0.0, 0.0]);
        assert_roots(&quadratic_roots(1.0, -1e8, 1.0), &[1e-8, 1e8]);
        assert_roots(&quadratic_roots(0.0, 2.0, -4.0), &[2.0]);
        assert!(quadratic_roots(0.0, 0.0, 5.0).is_empty());
    }

    #[test]
    fn cubic_with_one_real_root() {
        assert_roots(&cubic_roots(1.0, 0.0, 0.0, -1.0), &[1.0]);
        assert_roots(&cubic_roots(1.0, 0.0, 1.0, 0.0), &[0.0]);
    }

    #[test]
    fn cubic_with_repeated_roots() {
        // (x - 1)^2 (x + 2)
        assert_roots(&cubic_roots(1.0, 0.0, -3.0, 2.0), &[-2.0, 1.0, 1.0]);
        // (x + 1)^2 (x - 3)
        assert_roots(&cubic_roots(1.0, -1.0, -5.0, -3.0), &[-1.0, -1.0, 3.0]);
        // x^3
        assert_roots(&cubic_roots(1.0, 0.0, 0.0, 0.0), &[0.0, 0.0, 0.0]);
        // (x - 2)^3
        assert_roots(&cubic_roots(1.0, -6.0, 12.0, -8.0), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn cubic_with_three_real_roots() {
        // 2 (x + 1)(x - 0.5)(x - 4)
        assert_roots(&cubic_roots(2.0, -7.0, -5.0, 4.0), &[-1.0, 0.5, 4.0]);
    }

    #[test]
    fn degenerate_cubic_falls_back_to_quadratic() {
        assert_roots(&cubic_roots(0.0, 1.0, -3.0, 2.0), &[1.0, 2.0]);
    }
}
