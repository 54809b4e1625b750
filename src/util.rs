/// Numeric helpers and result formatting.
///
/// This module provides integer checks on doubles and the fixed/scientific
/// rendering rule used by the shell to print results.
pub mod num;
/// Real root extraction for quadratic and cubic polynomials.
///
/// Roots are found from the discriminant case split and refined with a fixed
/// number of Newton iterations.
pub mod polynomial;
