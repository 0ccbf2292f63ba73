use thiserror::Error;

use crate::fraction::Fraction;

pub mod radix {
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[non_exhaustive]
    pub enum Error {
        #[error("base {0} is outside the supported range 2..=36")]
        UnsupportedBase(u32),
        #[error("encoded value is empty")]
        EmptyValue,
        #[error("invalid character {character:?} at position {position}")]
        InvalidCharacter { character: char, position: usize },
        #[error(
            "invalid digit {character:?} at position {position}: value {digit} is not below base {base}"
        )]
        InvalidDigit {
            character: char,
            position: usize,
            digit: u32,
            base: u32,
        },
    }
}

pub use radix::Error as RadixError;

/// Common result type used across this crate.
pub type Result<T, E = MathError> = core::result::Result<T, E>;

/// Top-level error type to keep error management simple for users.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum MathError {
    #[error(transparent)]
    Radix(#[from] RadixError),
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}

pub type Error = MathError;

/// Errors returned by the Lagrange helpers.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum InterpolationError {
    #[error("cannot interpolate an empty point set")]
    NoPoints,
    #[error("expected exactly {expected} points, got {found}")]
    PointCountMismatch { expected: usize, found: usize },
    #[error("x = {0} appears more than once")]
    DuplicateAbscissa(num_bigint::BigInt),
    #[error("value at x = 0 is {0}, not an integer")]
    NonIntegerResult(Fraction),
}
