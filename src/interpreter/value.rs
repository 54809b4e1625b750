/// Complex number support.
///
/// Defines the `ComplexNumber` type used to give real exponentiation with a
/// negative base and fractional exponent its principal-branch meaning.
pub mod complex;
/// The runtime encoding of values.
///
/// Every value is a double; booleans are `1.0` and `0.0`. Native functions
/// may answer with either kind, see [`core::NativeValue`].
pub mod core;
