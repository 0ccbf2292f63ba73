use shamir_core::{
    audit_shares, decode_shares, ConsistencyPolicy, Reconstructor,
    ShamirError, Share, ShareSet,
};

/// Recover a secret from mixed-base shares, then corrupt one share and show
/// the strict check refusing it while the audit points at the culprit.
fn main() {
    // y = x^2 + 3
    let honest = vec![
        Share::new(1, 10, "4").expect("valid share"),
        Share::new(2, 2, "111").expect("valid share"),
        Share::new(3, 10, "12").expect("valid share"),
        Share::new(6, 4, "213").expect("valid share"),
    ];
    let shares = ShareSet::new(honest.clone()).expect("distinct share ids");

    let reconstructor = Reconstructor::new(3).expect("non-zero threshold");
    let result = reconstructor
        .reconstruct_secret(&shares)
        .expect("honest shares reconstruct");
    println!(
        "Recovered secret {} from shares {:?} ({:?})",
        result.secret, result.selected, result.consistency
    );

    let mut tampered = honest;
    tampered[3] = Share::new(6, 4, "220").expect("valid share");
    let tampered = ShareSet::new(tampered).expect("distinct share ids");

    match reconstructor.reconstruct_secret(&tampered) {
        Err(ShamirError::InconsistentShares { secret, surplus, .. }) => {
            println!("Strict check rejected: {secret} vs {surplus}")
        }
        other => panic!("expected an inconsistency, got {other:?}"),
    }

    let lenient = reconstructor
        .with_policy(ConsistencyPolicy::Skip)
        .reconstruct_secret(&tampered)
        .expect("skip policy ignores the surplus share");
    println!("Without the check the secret reads {}", lenient.secret);

    let audit = audit_shares(&decode_shares(&tampered), 3)
        .expect("audit finds a majority");
    println!(
        "Audit agrees on {} with {} of {} subsets; suspect shares {:?}",
        audit.secret, audit.votes, audit.subsets_evaluated, audit.suspect
    );
}
