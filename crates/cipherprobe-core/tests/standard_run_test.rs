//! End-to-end run over the built-in catalog.

use cipherprobe_core::{
    Catalog, Check, CheckError, CheckOutcome, Finding, RunConfig, Runner,
    checks::SymmetricDecryptCheck,
};
use hex_literal::hex;

/// Check that always fails the way a broken cipher would.
struct BrokenCipher;

impl Check for BrokenCipher {
    fn name(&self) -> &'static str {
        "BrokenCipher"
    }

    fn execute(&self) -> Result<CheckOutcome, CheckError> {
        Err(CheckError::RoundTripFailure {
            stage: "decrypt(encrypt(input))".to_string(),
            expected: "00".to_string(),
            actual: "01".to_string(),
        })
    }
}

#[test]
fn standard_run_results() {
    let catalog = Catalog::standard().unwrap();
    let report = Runner::standard(&catalog, &RunConfig::default()).run();

    let ordinals: Vec<_> = report.entries.iter().map(|e| (e.name, e.ordinal)).collect();
    assert_eq!(
        ordinals,
        vec![
            ("SymmetricEncryptCheck", 1),
            ("SymmetricDecryptCheck", 2),
            ("HashCheck", 3),
            ("MacCheck", 4),
            ("AsymmetricCheck", 5),
        ]
    );

    let hash = report.entry("HashCheck").unwrap().result.as_ref().unwrap();
    let mismatched: Vec<_> = hash
        .findings
        .iter()
        .filter_map(|f| match f {
            Finding::DigestMismatch { algorithm, .. } => Some(algorithm.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(mismatched, vec!["Tiger", "RipeMD320"]);

    let mac = report.entry("MacCheck").unwrap().result.as_ref().unwrap();
    assert!(matches!(
        mac.findings.as_slice(),
        [Finding::MacMismatch { algorithm, .. }] if algorithm == "HmacSHA1"
    ));

    let rsa = report.entry("AsymmetricCheck").unwrap().result.as_ref().unwrap();
    assert_eq!(rsa.comparisons[0].expected, hex!("ABBA0304").to_vec());
}

#[test]
fn failing_check_is_isolated() {
    let catalog = Catalog::standard().unwrap();
    let report = Runner::new(false)
        .with_check(BrokenCipher)
        .with_check(SymmetricDecryptCheck::new(&catalog.symmetric_decrypt))
        .with_check(BrokenCipher)
        .run();

    assert_eq!(report.failed_count(), 2);
    assert_eq!(report.passed_count(), 1);
    assert!(report.entries[1].passed());

    let err = report.entries[2].result.as_ref().unwrap_err();
    assert!(err.is_violation());
    assert_eq!(err.kind(), "RoundTripFailure");
}

#[test]
fn stop_on_first_digest_mismatch() {
    let catalog = Catalog::standard().unwrap();
    let config = RunConfig {
        hash_policy: cipherprobe_core::HashMismatchPolicy::StopOnFirst,
        only: vec!["HashCheck".to_string()],
        preflight: false,
        ..Default::default()
    };
    let report = Runner::standard(&catalog, &config).run();

    assert_eq!(report.entries.len(), 1);
    let outcome = report.entries[0].result.as_ref().unwrap();
    assert_eq!(outcome.skipped, 2);
    assert!(report.preflight.is_none());
}
