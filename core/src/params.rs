use std::fmt;

use crate::error::{ShamirError, ShamirResult};

/// Upper bound on the number of k-subsets [`audit_shares`] will evaluate.
///
/// [`audit_shares`]: crate::audit::audit_shares
pub const MAX_AUDIT_SUBSETS: u128 = 1 << 16;

/// Minimum number of points needed to pin down the share polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Threshold(usize);

impl Threshold {
    pub fn new(threshold: usize) -> ShamirResult<Self> {
        if threshold == 0 {
            return Err(ShamirError::InvalidThreshold(threshold));
        }
        Ok(Self(threshold))
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for Threshold {
    type Error = ShamirError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What to do with points beyond the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConsistencyPolicy {
    /// Re-interpolate with one extra point and require the same secret.
    #[default]
    Strict,
    /// Use the first `k` points only.
    Skip,
}

/// Validate a threshold against the number of shares on offer.
pub fn validate_threshold_config(threshold: usize, shares: usize) -> bool {
    (1..=shares).contains(&threshold)
}
