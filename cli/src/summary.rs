//! Serializable view of a reconstruction run, used by `--json`.

use serde::Serialize;
use shamir_core::{
    processor::{AcceptedShare, RejectedShare},
    AuditReport, CaseOutcome, Consistency, ShamirResult,
};

#[derive(Debug, Serialize)]
pub struct ShareSummary {
    pub x: u64,
    pub base: u32,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&AcceptedShare> for ShareSummary {
    fn from(accepted: &AcceptedShare) -> Self {
        Self {
            x: accepted.share.x(),
            base: accepted.share.base(),
            value: accepted.share.encoded().to_string(),
            decoded: Some(accepted.point.y.to_string()),
            error: None,
        }
    }
}

impl From<&RejectedShare> for ShareSummary {
    fn from(rejected: &RejectedShare) -> Self {
        Self {
            x: rejected.share.x(),
            base: rejected.share.base(),
            value: rejected.share.encoded().to_string(),
            decoded: None,
            error: Some(rejected.reason.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuditSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsets: Option<usize>,
    pub suspect: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ShamirResult<AuditReport>> for AuditSummary {
    fn from(result: &ShamirResult<AuditReport>) -> Self {
        match result {
            Ok(report) => Self {
                secret: Some(report.secret.to_string()),
                votes: Some(report.votes),
                subsets: Some(report.subsets_evaluated),
                suspect: report.suspect.clone(),
                error: None,
            },
            Err(err) => Self {
                secret: None,
                votes: None,
                subsets: None,
                suspect: Vec::new(),
                error: Some(err.to_string()),
            },
        }
    }
}

/// One share file's result.
#[derive(Debug, Serialize)]
pub struct CaseSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<usize>,
    pub shares: Vec<ShareSummary>,
    pub selected: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Number of points that reproduced the secret, when checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_with: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaseSummary {
    pub fn from_outcome(
        outcome: &CaseOutcome,
        audit: Option<&ShamirResult<AuditReport>>,
    ) -> Self {
        let mut shares: Vec<ShareSummary> = outcome
            .report
            .accepted
            .iter()
            .map(ShareSummary::from)
            .chain(outcome.report.rejected.iter().map(ShareSummary::from))
            .collect();
        shares.sort_by_key(|share| share.x);

        let (secret, selected, verified_with, error) = match &outcome.result {
            Ok(reconstruction) => (
                Some(reconstruction.secret.to_string()),
                reconstruction.selected.clone(),
                match reconstruction.consistency {
                    Consistency::Verified { points } => Some(points),
                    Consistency::Unchecked => None,
                },
                None,
            ),
            Err(err) => (None, Vec::new(), None, Some(err.to_string())),
        };

        Self {
            name: outcome.name.clone(),
            threshold: Some(outcome.threshold),
            shares,
            selected,
            secret,
            verified_with,
            audit: audit.map(AuditSummary::from),
            error,
        }
    }

    /// A file that could not be loaded.
    pub fn load_failure(name: String, error: &anyhow::Error) -> Self {
        Self {
            name,
            threshold: None,
            shares: Vec::new(),
            selected: Vec::new(),
            secret: None,
            verified_with: None,
            audit: None,
            error: Some(format!("{error:#}")),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
