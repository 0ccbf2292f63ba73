use math::{error::InterpolationError, Fraction};
use num_bigint::BigInt;
use thiserror::Error;

/// Result type specialized for reconstruction operations.
pub type ShamirResult<T> = std::result::Result<T, ShamirError>;

/// Result type for loading share-set data files.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Set-level failures. Any of these aborts reconstruction of a share set.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShamirError {
    #[error("Invalid share ID: {0}")]
    InvalidShareId(u64),
    #[error("Invalid threshold: {0} (must be at least 1)")]
    InvalidThreshold(usize),
    #[error("Duplicate x value: {0}")]
    DuplicateXValue(u64),
    #[error("Insufficient shares: need {required}, got {available}")]
    InsufficientShares { required: usize, available: usize },
    #[error("Interpolated value at x = 0 is {0}, not an integer")]
    NonIntegerResult(Fraction),
    #[error(
        "Inconsistent shares: {threshold} points give {secret}, {surplus_points} points give {surplus}"
    )]
    InconsistentShares {
        threshold: usize,
        secret: BigInt,
        surplus_points: usize,
        surplus: Fraction,
    },
    #[error("Audit would evaluate {subsets} subsets, limit is {limit}")]
    AuditLimitExceeded { subsets: u128, limit: u128 },
    #[error("No secret has a unique highest vote count among share subsets")]
    NoMajority,
    #[error(transparent)]
    Interpolation(InterpolationError),
}

impl From<InterpolationError> for ShamirError {
    fn from(err: InterpolationError) -> Self {
        match err {
            InterpolationError::NonIntegerResult(value) => {
                ShamirError::NonIntegerResult(value)
            }
            InterpolationError::DuplicateAbscissa(ref x) => {
                match u64::try_from(x) {
                    Ok(x) => ShamirError::DuplicateXValue(x),
                    Err(_) => ShamirError::Interpolation(err),
                }
            }
            other => ShamirError::Interpolation(other),
        }
    }
}

/// Errors raised while reading a share-set data file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read share file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed share file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("share file has no \"keys\" section")]
    MissingKeys,
    #[error("share key {0:?} is not a positive integer")]
    InvalidShareKey(String),
    #[error("share {x} has base {base:?}, expected an integer")]
    InvalidBase { x: u64, base: String },
    #[error("\"keys.n\" declares {declared} shares but {found} are present")]
    ShareCountMismatch { declared: usize, found: usize },
    #[error("threshold {threshold} is outside 1..={shares}")]
    InvalidThreshold { threshold: usize, shares: usize },
    #[error(transparent)]
    Shamir(#[from] ShamirError),
}

#[cfg(test)]
mod tests {
    use num_traits::One;

    use super::*;

    #[test]
    fn non_integer_result_is_lifted() {
        let err = ShamirError::from(InterpolationError::NonIntegerResult(
            math::frac!(1, 2),
        ));
        assert_eq!(err, ShamirError::NonIntegerResult(math::frac!(1, 2)));
    }

    #[test]
    fn duplicate_abscissa_becomes_duplicate_x() {
        let err = ShamirError::from(InterpolationError::DuplicateAbscissa(
            BigInt::one(),
        ));
        assert_eq!(err, ShamirError::DuplicateXValue(1));
    }

    #[test]
    fn negative_abscissa_stays_an_interpolation_error() {
        let err = ShamirError::from(InterpolationError::DuplicateAbscissa(
            BigInt::from(-4),
        ));
        assert!(matches!(err, ShamirError::Interpolation(_)));
    }

    #[test]
    fn messages_name_the_counts() {
        let err = ShamirError::InsufficientShares {
            required: 3,
            available: 2,
        };
        assert_eq!(err.to_string(), "Insufficient shares: need 3, got 2");
    }
}
