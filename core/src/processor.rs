//! Share set processing: decode, select, interpolate, cross-check.
//!
//! Subset selection is deterministic: decoded points are ordered by
//! ascending x and the first `k` are used. When more points are available
//! and the policy is [`ConsistencyPolicy::Strict`], the first `k + 1` are
//! interpolated as well and must yield the same integer.

use math::{
    error::RadixError,
    lagrange::{interpolate_at, interpolate_at_zero},
    Fraction,
};
use num_bigint::BigInt;
use num_traits::Zero;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ShamirError, ShamirResult},
    params::{ConsistencyPolicy, Threshold},
    share::{Point, Share, ShareSet},
};

/// A share that decoded cleanly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptedShare {
    pub share: Share,
    pub point: Point,
}

/// A share excluded from reconstruction, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedShare {
    pub share: Share,
    pub reason: RadixError,
}

/// Outcome of decoding every share in a set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub accepted: Vec<AcceptedShare>,
    pub rejected: Vec<RejectedShare>,
}

impl DecodeReport {
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.accepted.iter().map(|accepted| &accepted.point)
    }

    /// Decoded points ordered by ascending x.
    ///
    /// Reports built by hand are not trusted to be sorted or duplicate-free.
    pub fn sorted_points(&self) -> ShamirResult<Vec<Point>> {
        let mut points: Vec<Point> = self.points().cloned().collect();
        points.sort_by_key(|point| point.x);
        if let Some(pair) = points.windows(2).find(|w| w[0].x == w[1].x) {
            return Err(ShamirError::DuplicateXValue(pair[0].x));
        }
        Ok(points)
    }
}

/// Whether surplus points confirmed the secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Consistency {
    /// The secret was reproduced from this many points.
    Verified { points: usize },
    /// No surplus point existed, or the check was disabled.
    Unchecked,
}

/// A successfully recovered secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconstruction {
    pub secret: BigInt,
    /// Every share's decode outcome, including the ones left out.
    pub report: DecodeReport,
    /// x-values of the points fed to the interpolator, ascending.
    pub selected: Vec<u64>,
    pub consistency: Consistency,
}

/// Decode every share, keeping failures in the report instead of aborting.
pub fn decode_shares(shares: &ShareSet) -> DecodeReport {
    let mut report = DecodeReport::default();

    for share in shares {
        match share.decode() {
            Ok(point) => {
                debug!(
                    x = share.x(),
                    base = share.base(),
                    encoded = share.encoded(),
                    y = %point.y,
                    "decoded share"
                );
                report.accepted.push(AcceptedShare {
                    share: share.clone(),
                    point,
                });
            }
            Err(reason) => {
                warn!(
                    x = share.x(),
                    base = share.base(),
                    encoded = share.encoded(),
                    %reason,
                    "rejected share"
                );
                report.rejected.push(RejectedShare {
                    share: share.clone(),
                    reason,
                });
            }
        }
    }

    report
}

/// Recovers the constant term of the share polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reconstructor {
    threshold: Threshold,
    policy: ConsistencyPolicy,
}

impl Reconstructor {
    pub fn new(threshold: usize) -> ShamirResult<Self> {
        Ok(Self {
            threshold: Threshold::new(threshold)?,
            policy: ConsistencyPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: ConsistencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn threshold(&self) -> usize {
        self.threshold.get()
    }

    pub fn policy(&self) -> ConsistencyPolicy {
        self.policy
    }

    /// Decode `shares` and reconstruct the secret.
    #[instrument(skip_all, fields(threshold = self.threshold.get(), shares = shares.len()))]
    pub fn reconstruct_secret(
        &self,
        shares: &ShareSet,
    ) -> ShamirResult<Reconstruction> {
        self.reconstruct_decoded(decode_shares(shares))
    }

    /// Reconstruct from an existing decode report.
    pub fn reconstruct_report(
        &self,
        report: &DecodeReport,
    ) -> ShamirResult<Reconstruction> {
        self.reconstruct_decoded(report.clone())
    }

    fn reconstruct_decoded(
        &self,
        report: DecodeReport,
    ) -> ShamirResult<Reconstruction> {
        let k = self.threshold.get();
        let points = self.select_points(&report)?;

        let secret = interpolate_at_zero(&points[..k], k)?;
        let selected = points[..k].iter().map(|point| point.x).collect();

        let consistency = match self.policy {
            ConsistencyPolicy::Strict if points.len() > k => {
                Self::verify_surplus(&points[..=k], &secret)?;
                Consistency::Verified { points: k + 1 }
            }
            _ => Consistency::Unchecked,
        };

        info!(%secret, ?consistency, "reconstructed secret");
        Ok(Reconstruction {
            secret,
            report,
            selected,
            consistency,
        })
    }

    fn select_points(&self, report: &DecodeReport) -> ShamirResult<Vec<Point>> {
        let points = report.sorted_points()?;
        let required = self.threshold.get();

        if points.len() < required {
            return Err(ShamirError::InsufficientShares {
                required,
                available: points.len(),
            });
        }

        Ok(points)
    }

    fn verify_surplus(points: &[Point], secret: &BigInt) -> ShamirResult<()> {
        let surplus = interpolate_at(points, &BigInt::zero())?;
        if surplus != Fraction::from(secret.clone()) {
            warn!(%secret, %surplus, "surplus share disagrees");
            return Err(ShamirError::InconsistentShares {
                threshold: points.len() - 1,
                secret: secret.clone(),
                surplus_points: points.len(),
                surplus,
            });
        }
        Ok(())
    }
}

/// Reconstruct with the default strict consistency policy.
pub fn reconstruct_secret(
    shares: &ShareSet,
    threshold: usize,
) -> ShamirResult<Reconstruction> {
    Reconstructor::new(threshold)?.reconstruct_secret(shares)
}
