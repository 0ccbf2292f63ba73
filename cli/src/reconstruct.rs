use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use shamir_core::{
    audit_shares, reconstruct_batch, AuditReport, CaseOutcome, Consistency,
    ConsistencyPolicy, ShamirResult, ShareSetFile,
};
use tracing::{error, info};

use crate::summary::CaseSummary;

pub fn execute(
    files: &[PathBuf],
    policy: ConsistencyPolicy,
    audit: bool,
    json: bool,
) -> Result<()> {
    let mut cases = Vec::with_capacity(files.len());
    let mut summaries = Vec::new();

    for path in files {
        let name = path.display().to_string();
        match ShareSetFile::load(path)
            .with_context(|| format!("failed to load {name}"))
        {
            Ok(file) => cases.push(file.into_case(name)),
            Err(err) => {
                error!("{err:#}");
                if !json {
                    println!("== {name} ==\n  {err:#}\n");
                }
                summaries.push(CaseSummary::load_failure(name, &err));
            }
        }
    }

    info!(cases = cases.len(), ?policy, "reconstructing");
    for outcome in reconstruct_batch(&cases, policy) {
        let audit_report =
            audit.then(|| audit_shares(&outcome.report, outcome.threshold));
        if !json {
            print_outcome(&outcome, audit_report.as_ref());
        }
        summaries.push(CaseSummary::from_outcome(
            &outcome,
            audit_report.as_ref(),
        ));
    }

    let failed = summaries.iter().filter(|s| !s.is_success()).count();
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("Results:");
        for summary in &summaries {
            match (&summary.secret, &summary.error) {
                (Some(secret), _) => println!("  {}: {secret}", summary.name),
                (None, Some(err)) => {
                    println!("  {}: failed ({err})", summary.name)
                }
                (None, None) => {}
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} share sets failed", summaries.len());
    }
    Ok(())
}

fn print_outcome(
    outcome: &CaseOutcome,
    audit: Option<&ShamirResult<AuditReport>>,
) {
    println!(
        "== {} (k = {}, {} shares) ==",
        outcome.name,
        outcome.threshold,
        outcome.report.accepted.len() + outcome.report.rejected.len()
    );

    for accepted in &outcome.report.accepted {
        let share = &accepted.share;
        println!(
            "  x = {:<3} base {:<2} {:>40} -> {}",
            share.x(),
            share.base(),
            share.encoded(),
            accepted.point.y
        );
    }
    for rejected in &outcome.report.rejected {
        let share = &rejected.share;
        println!(
            "  x = {:<3} base {:<2} {:>40} rejected: {}",
            share.x(),
            share.base(),
            share.encoded(),
            rejected.reason
        );
    }

    match &outcome.result {
        Ok(reconstruction) => {
            println!("  selected points: {:?}", reconstruction.selected);
            match reconstruction.consistency {
                Consistency::Verified { points } => println!(
                    "  secret: {} (confirmed by {points} points)",
                    reconstruction.secret
                ),
                Consistency::Unchecked => {
                    println!("  secret: {}", reconstruction.secret)
                }
            }
        }
        Err(err) => println!("  error: {err}"),
    }

    match audit {
        Some(Ok(report)) => println!(
            "  audit: {} from {} of {} subsets, suspect shares {:?}",
            report.secret, report.votes, report.subsets_evaluated, report.suspect
        ),
        Some(Err(err)) => println!("  audit failed: {err}"),
        None => {}
    }
    println!();
}
