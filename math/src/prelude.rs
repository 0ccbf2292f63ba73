pub use crate::frac;
pub use crate::{
    error::{InterpolationError, MathError, RadixError},
    fraction::Fraction,
    lagrange::{interpolate_at, interpolate_at_zero},
    radix::{decode, encode, MAX_BASE, MIN_BASE},
    traits::PointSource,
};
