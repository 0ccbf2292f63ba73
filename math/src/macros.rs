//! Shared macros for constructing exact numeric values.

/// Simplifies constructing [`Fraction`](crate::fraction::Fraction)s.
///
/// Both arguments may be any integer type convertible into a `BigInt`.
/// Panics when the denominator is zero, so reserve it for literals.
///
/// ```
/// use math::prelude::*;
///
/// let half = frac!(2, 4);
/// assert_eq!(half, frac!(-1, -2));
/// assert_eq!(half.to_string(), "1/2");
/// ```
#[macro_export]
macro_rules! frac {
    ($numerator:expr) => {
        $crate::fraction::Fraction::ratio($numerator, 1)
            .expect("unit denominator is never zero")
    };
    ($numerator:expr, $denominator:expr $(,)?) => {
        $crate::fraction::Fraction::ratio($numerator, $denominator)
            .expect("frac!: denominator must be non-zero")
    };
}
