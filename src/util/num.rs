/// Number of decimals printed by [`format_result`].
pub const RESULT_DECIMALS: usize = 5;

/// Whether a double holds an integer value.
///
/// ## Example
/// ```
/// use numera::util::num::is_integer;
///
/// assert!(is_integer(-3.0));
/// assert!(!is_integer(2.5));
/// assert!(!is_integer(f64::INFINITY));
/// ```
#[must_use]
pub fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Formats a result for display.
///
/// Values whose magnitude is zero or lies in `[0.1, 10)` are printed in fixed
/// point with five decimals, everything else in scientific notation with five
/// decimals. `NaN` (the undefined marker) prints as `undefined`.
///
/// ## Example
/// ```
/// use numera::util::num::format_result;
///
/// assert_eq!(format_result(0.0), "0.00000");
/// assert_eq!(format_result(3.14159265), "3.14159");
/// assert_eq!(format_result(-0.5), "-0.50000");
/// assert_eq!(format_result(512.0), "5.12000e2");
/// assert_eq!(format_result(0.0123), "1.23000e-2");
/// assert_eq!(format_result(f64::NAN), "undefined");
/// ```
#[must_use]
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return "undefined".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // The range applies to the value as it would be printed in fixed point.
    let fixed = format!("{value:.prec$}", prec = RESULT_DECIMALS);
    let shown = fixed.parse::<f64>().unwrap_or(value);
    if value == 0.0 {
        format!("{:.prec$}", 0.0, prec = RESULT_DECIMALS)
    } else if (0.1..10.0).contains(&shown.abs()) {
        fixed
    } else {
        format!("{value:.prec$e}", prec = RESULT_DECIMALS)
    }
}

/// Renders a double as source text that lexes and evaluates back to it.
///
/// Finite non-negative values use the shortest round-trip representation.
/// Infinities use an overflowing literal and `NaN` the undefined power
/// `0 ^ 0`.
///
/// ## Example
/// ```
/// use numera::util::num::literal_source;
///
/// assert_eq!(literal_source(2.5), "2.5");
/// assert_eq!(literal_source(-4.0), "-4");
/// assert_eq!(literal_source(f64::INFINITY), "1e999");
/// assert_eq!(literal_source(f64::NAN), "(0 ^ 0)");
/// ```
#[must_use]
pub fn literal_source(value: f64) -> String {
    if value.is_nan() {
        "(0 ^ 0)".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "1e999" } else { "-1e999" }.to_string()
    } else {
        format!("{value}")
    }
}
