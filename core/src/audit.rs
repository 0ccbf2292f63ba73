//! Plurality vote over every threshold-sized subset of decoded points.
//!
//! Honest shares all lie on one polynomial, so every subset drawn only from
//! them reconstructs the same secret. A faulty share drags each subset it
//! joins somewhere else. The integer result with the most votes wins, even
//! short of an absolute majority, provided no other result ties it. Shares
//! that never appear in a winning subset are suspect.

use std::collections::{BTreeMap, BTreeSet};

use math::lagrange::interpolate_at_zero;
use num_bigint::BigInt;
use tracing::{debug, info, instrument};

use crate::{
    error::{ShamirError, ShamirResult},
    params::{Threshold, MAX_AUDIT_SUBSETS},
    processor::DecodeReport,
    share::Point,
    utils::{binomial, Combinations},
};

/// Result of [`audit_shares`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub secret: BigInt,
    /// Subsets that reconstructed `secret`.
    pub votes: usize,
    pub subsets_evaluated: usize,
    /// Subsets whose value at zero was not an integer.
    pub non_integer_subsets: usize,
    /// x-values of shares appearing in at least one winning subset.
    pub supporting: Vec<u64>,
    /// x-values of shares never part of a winning subset.
    pub suspect: Vec<u64>,
}

#[derive(Default)]
struct Tally {
    votes: usize,
    members: BTreeSet<u64>,
}

/// Vote across every `threshold`-subset of the decoded points.
#[instrument(skip_all, fields(threshold = threshold, points = report.accepted.len()))]
pub fn audit_shares(
    report: &DecodeReport,
    threshold: usize,
) -> ShamirResult<AuditReport> {
    let k = Threshold::new(threshold)?.get();
    let points = report.sorted_points()?;

    if points.len() < k {
        return Err(ShamirError::InsufficientShares {
            required: k,
            available: points.len(),
        });
    }

    let subsets = binomial(points.len(), k);
    if subsets > MAX_AUDIT_SUBSETS {
        return Err(ShamirError::AuditLimitExceeded {
            subsets,
            limit: MAX_AUDIT_SUBSETS,
        });
    }

    let mut tallies: BTreeMap<BigInt, Tally> = BTreeMap::new();
    let mut evaluated = 0;
    let mut non_integer = 0;

    for indices in Combinations::new(points.len(), k) {
        let subset: Vec<&Point> = indices.iter().map(|&i| &points[i]).collect();
        evaluated += 1;

        match interpolate_at_zero(&subset, k) {
            Ok(secret) => {
                let tally = tallies.entry(secret).or_default();
                tally.votes += 1;
                tally.members.extend(subset.iter().map(|point| point.x));
            }
            Err(math::error::InterpolationError::NonIntegerResult(value)) => {
                debug!(?indices, %value, "subset gives a non-integer");
                non_integer += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    let (secret, tally) = plurality(tallies)?;
    let suspect = points
        .iter()
        .map(|point| point.x)
        .filter(|x| !tally.members.contains(x))
        .collect::<Vec<_>>();

    info!(%secret, votes = tally.votes, ?suspect, "audit complete");
    Ok(AuditReport {
        secret,
        votes: tally.votes,
        subsets_evaluated: evaluated,
        non_integer_subsets: non_integer,
        supporting: tally.members.into_iter().collect(),
        suspect,
    })
}

fn plurality(
    tallies: BTreeMap<BigInt, Tally>,
) -> ShamirResult<(BigInt, Tally)> {
    let mut best: Option<(BigInt, Tally)> = None;
    let mut tied = false;

    for (secret, tally) in tallies {
        let leading = best.as_ref().map(|(_, leader)| leader.votes);
        match leading {
            Some(votes) if tally.votes < votes => {}
            Some(votes) if tally.votes == votes => tied = true,
            _ => {
                tied = false;
                best = Some((secret, tally));
            }
        }
    }

    match best {
        Some(winner) if !tied => Ok(winner),
        _ => Err(ShamirError::NoMajority),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        processor::decode_shares,
        share::{Share, ShareSet},
    };

    fn report_for(points: &[(u64, u64)]) -> DecodeReport {
        let shares = points
            .iter()
            .map(|&(x, y)| Share::new(x, 10, y.to_string()).unwrap())
            .collect();
        decode_shares(&ShareSet::new(shares).unwrap())
    }

    #[test]
    fn consistent_shares_have_no_suspects() {
        // y = x^2 + 3
        let report = report_for(&[(1, 4), (2, 7), (3, 12), (6, 39)]);
        let audit = audit_shares(&report, 3).unwrap();
        assert_eq!(audit.secret, BigInt::from(3));
        assert_eq!(audit.votes, 4);
        assert_eq!(audit.subsets_evaluated, 4);
        assert!(audit.suspect.is_empty());
        assert_eq!(audit.supporting, vec![1, 2, 3, 6]);
    }

    #[test]
    fn single_faulty_share_is_flagged() {
        // y = 2x + 5 with x = 4 corrupted
        let report = report_for(&[(1, 7), (2, 9), (3, 11), (4, 14), (5, 15)]);
        let audit = audit_shares(&report, 2).unwrap();
        assert_eq!(audit.secret, BigInt::from(5));
        assert_eq!(audit.votes, 6);
        assert_eq!(audit.subsets_evaluated, 10);
        assert_eq!(audit.suspect, vec![4]);
    }

    #[test]
    fn plurality_wins_without_majority() {
        // y = 2x + 5 with x = 4 and x = 5 corrupted
        let report =
            report_for(&[(1, 7), (2, 9), (3, 11), (4, 100), (5, 250)]);
        let audit = audit_shares(&report, 2).unwrap();
        assert_eq!(audit.secret, BigInt::from(5));
        assert_eq!(audit.votes, 3);
        assert_eq!(audit.subsets_evaluated, 10);
        assert_eq!(audit.suspect, vec![4, 5]);
    }

    #[test]
    fn tie_means_no_majority() {
        // no value is reached by more than one pair
        let report = report_for(&[(1, 1), (2, 5), (3, 2)]);
        assert_eq!(audit_shares(&report, 2), Err(ShamirError::NoMajority));
    }

    #[test]
    fn audit_requires_enough_points() {
        let report = report_for(&[(1, 4), (2, 7)]);
        assert_eq!(
            audit_shares(&report, 3),
            Err(ShamirError::InsufficientShares {
                required: 3,
                available: 2,
            })
        );
    }

    #[test]
    fn audit_is_bounded() {
        let points: Vec<(u64, u64)> = (1..=40).map(|x| (x, x)).collect();
        let report = report_for(&points);
        assert!(matches!(
            audit_shares(&report, 20),
            Err(ShamirError::AuditLimitExceeded { .. })
        ));
    }
}
