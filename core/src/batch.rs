//! Independent share sets reconstructed side by side.

use rayon::prelude::*;
use tracing::info_span;

use crate::{
    error::ShamirResult,
    params::ConsistencyPolicy,
    processor::{decode_shares, DecodeReport, Reconstruction, Reconstructor},
    share::ShareSet,
};

/// One share set to reconstruct, with its threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSetCase {
    pub name: String,
    pub threshold: usize,
    pub shares: ShareSet,
}

/// Decode report and reconstruction result for a [`ShareSetCase`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseOutcome {
    pub name: String,
    pub threshold: usize,
    pub report: DecodeReport,
    pub result: ShamirResult<Reconstruction>,
}

impl CaseOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Reconstruct a single case.
pub fn reconstruct_case(
    case: &ShareSetCase,
    policy: ConsistencyPolicy,
) -> CaseOutcome {
    let _span = info_span!("case", name = %case.name).entered();
    let report = decode_shares(&case.shares);
    let result = Reconstructor::new(case.threshold).and_then(|reconstructor| {
        reconstructor.with_policy(policy).reconstruct_report(&report)
    });

    CaseOutcome {
        name: case.name.clone(),
        threshold: case.threshold,
        report,
        result,
    }
}

/// Reconstruct every case on the rayon pool. Output order follows input
/// order.
pub fn reconstruct_batch(
    cases: &[ShareSetCase],
    policy: ConsistencyPolicy,
) -> Vec<CaseOutcome> {
    cases
        .par_iter()
        .map(|case| reconstruct_case(case, policy))
        .collect()
}
