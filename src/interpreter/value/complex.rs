use std::{fmt::Display, ops};

use ordered_float::OrderedFloat;

/// `0.0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1.0` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);

/// Represents a complex number with real and imaginary parts.
///
/// The language itself only stores real doubles. Complex numbers appear as
/// intermediates when a negative base is raised to a fractional power.
#[derive(Debug, Clone, Copy)]
pub struct ComplexNumber {
    /// The real part of the number.
    pub real:      f64,
    /// The imaginary part of the number.
    pub imaginary: f64,
}

impl Display for ComplexNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.real, self.imaginary) {
            (0.0, 0.0) => write!(f, "0"),
            (real, 0.0) => write!(f, "{real}"),
            (0.0, imaginary) => write!(f, "{imaginary}i",),
            (real, imaginary) if imaginary > 0.0 => write!(f, "{real} + {imaginary}i"),
            (real, imaginary) => write!(f, "{real} - {}i", -imaginary),
        }
    }
}

impl ComplexNumber {
    /// Constructs a new complex number from real and imaginary components.
    ///
    /// # Example
    /// ```
    /// use numera::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!(c.real, 5.0);
    /// assert_eq!(c.imaginary, -1.0);
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Constructs a complex number from polar coordinates.
    #[must_use]
    pub fn from_polar(magnitude: f64, argument: f64) -> Self {
        Self { real:      magnitude * argument.cos(),
               imaginary: magnitude * argument.sin(), }
    }

    /// Returns the magnitude of the complex number.
    ///
    /// # Example
    /// ```
    /// use numera::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(3.0, 4.0);
    /// assert_eq!(c.abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }

    /// Returns the complex conjugate of the number.
    ///
    /// # Example
    /// ```
    /// use numera::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(1.0, 5.0);
    /// assert_eq!(c.conj(), ComplexNumber::new(1.0, -5.0));
    /// ```
    #[must_use]
    pub const fn conj(&self) -> Self {
        Self { real:      self.real,
               imaginary: -self.imaginary, }
    }

    /// Returns the reciprocal (1/z) of the complex number.
    ///
    /// The reciprocal of zero has non-finite parts.
    #[must_use]
    pub const fn recip(&self) -> Self {
        let norm_squared = self.real * self.real + self.imaginary * self.imaginary;

        Self { real:      self.real / norm_squared,
               imaginary: -(self.imaginary / norm_squared), }
    }

    /// Returns the argument (phase angle) in radians, in `(-pi, pi]`.
    #[must_use]
    pub fn arg(self) -> f64 {
        self.imaginary.atan2(self.real)
    }

    /// Whether both parts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imaginary == 0.0
    }

    /// Raises the complex number to a real power on the principal branch.
    ///
    /// # Example
    /// ```
    /// use numera::interpreter::value::complex::ComplexNumber;
    /// // The principal cube root of -8 is 1 + 1.732i.
    /// let root = ComplexNumber::new(-8.0, 0.0).powf(1.0 / 3.0);
    /// assert!((root.real - 1.0).abs() < 1e-12);
    /// assert!((root.imaginary - 3f64.sqrt()).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn powf(self, exp: f64) -> Self {
        if exp == 0.0 {
            return ONE;
        }
        if self.is_zero() {
            return ZERO;
        }
        Self::from_polar(self.abs().powf(exp), self.arg() * exp)
    }

    /// Raises the complex number to a complex power, `exp(w * ln(z))`.
    #[must_use]
    pub fn powc(self, exp: Self) -> Self {
        if exp.is_zero() {
            return ONE;
        }
        if self.is_zero() {
            return ZERO;
        }
        (exp * self.ln()).exp()
    }

    /// Returns the principal square root of the complex number.
    ///
    /// # Example
    /// ```
    /// use numera::interpreter::value::complex::ComplexNumber;
    /// let s = ComplexNumber::new(-4.0, 0.0).sqrt();
    /// assert_eq!(s, ComplexNumber::new(0.0, 2.0));
    /// ```
    #[must_use]
    pub fn sqrt(self) -> Self {
        let a = self.real;
        let b = self.imaginary;
        let r = a.hypot(b);

        let real = f64::midpoint(r, a).sqrt();
        let imaginary = ((r - a) / 2.0).sqrt().copysign(b);

        Self { real, imaginary }
    }

    /// Returns the exponential of the complex number.
    #[must_use]
    pub fn exp(self) -> Self {
        Self::from_polar(self.real.exp(), self.imaginary)
    }

    /// Returns the principal natural logarithm of the complex number.
    #[must_use]
    pub fn ln(self) -> Self {
        Self { real:      self.abs().ln(),
               imaginary: self.arg(), }
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { real:      -self.real,
               imaginary: -self.imaginary, }
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { real:      self.real + rhs.real,
               imaginary: self.imaginary + rhs.imaginary, }
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { real:      self.real - rhs.real,
               imaginary: self.imaginary - rhs.imaginary, }
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self { real:      self.real
                              .mul_add(rhs.real, -(self.imaginary * rhs.imaginary)),
               imaginary: self.real.mul_add(rhs.imaginary, self.imaginary * rhs.real), }
    }
}

impl ops::Div for ComplexNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

impl From<f64> for ComplexNumber {
    fn from(value: f64) -> Self {
        Self { real:      value,
               imaginary: 0.0, }
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.real) == OrderedFloat(other.real)
        && OrderedFloat(self.imaginary) == OrderedFloat(other.imaginary)
    }
}

impl Eq for ComplexNumber {}
