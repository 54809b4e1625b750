/// The double that encodes `true`.
pub const TRUE: f64 = 1.0;
/// The double that encodes `false`.
pub const FALSE: f64 = 0.0;

/// Encodes a boolean as a double.
///
/// # Example
/// ```
/// use numera::interpreter::value::core::encode_bool;
///
/// assert_eq!(encode_bool(true), 1.0);
/// assert_eq!(encode_bool(false), 0.0);
/// ```
#[must_use]
pub const fn encode_bool(value: bool) -> f64 {
    if value { TRUE } else { FALSE }
}

/// The boolean view of a value: anything but zero is true.
///
/// `NaN` is truthy, as it compares unequal to zero.
#[must_use]
pub fn truthy(value: f64) -> bool {
    value != 0.0
}

/// Whether a value is one of the two boolean encodings.
#[must_use]
pub fn is_boolean(value: f64) -> bool {
    value == TRUE || value == FALSE
}

/// A value returned by a native function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeValue {
    /// A numeric result.
    Number(f64),
    /// A boolean result, stored as `1.0` / `0.0`.
    Boolean(bool),
}

impl NativeValue {
    /// Converts the result to the internal double encoding.
    #[must_use]
    pub const fn into_f64(self) -> f64 {
        match self {
            Self::Number(n) => n,
            Self::Boolean(b) => encode_bool(b),
        }
    }
}

impl From<f64> for NativeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for NativeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
