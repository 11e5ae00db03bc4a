//! Hash known-answer check.

use cipherprobe_crypto::digest;

use super::Check;
use crate::{
    CheckError, CheckOutcome, DigestVector, Finding, HashMismatchPolicy,
    codec::Hex,
    model::{Buffer, Perturbation, PerturbationResult},
};

/// Compares each digest with its published value and probes the first text
/// byte of every matching vector.
#[derive(Debug, Clone, Copy)]
pub struct HashCheck<'a> {
    vectors: &'a [DigestVector],
    policy: HashMismatchPolicy,
}

impl<'a> HashCheck<'a> {
    /// Check `vectors` in order.
    pub fn new(vectors: &'a [DigestVector], policy: HashMismatchPolicy) -> Self {
        Self { vectors, policy }
    }
}

impl Check for HashCheck<'_> {
    fn name(&self) -> &'static str {
        "HashCheck"
    }

    fn execute(&self) -> Result<CheckOutcome, CheckError> {
        let mut outcome = CheckOutcome::new(self.name());

        for (index, vector) in self.vectors.iter().enumerate() {
            let algorithm = vector.algorithm;
            tracing::info!("Algorithm: {}", algorithm);
            tracing::info!("Text: {}", Hex(&vector.text));

            let computed = digest(algorithm, &vector.text);
            if !outcome.compare(format!("{algorithm} digest"), &vector.expected, &computed) {
                outcome.find(Finding::DigestMismatch {
                    algorithm: algorithm.to_string(),
                    expected: Hex(&vector.expected).to_string(),
                    computed: Hex(&computed).to_string(),
                });

                if self.policy == HashMismatchPolicy::StopOnFirst {
                    outcome.skipped = self.vectors.len() - index - 1;
                    tracing::warn!("Skipping {} remaining digest vectors", outcome.skipped);
                    break;
                }
                continue;
            }

            tracing::info!("Modifying first byte of text, hashing...");
            let flip = Perturbation::flip(Buffer::Text, 0, 0);
            let modified = digest(algorithm, &flip.apply(&vector.text));
            outcome.probe(PerturbationResult::new(flip, computed, modified, 1));
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use cipherprobe_crypto::HashAlgorithm;
    use hex_literal::hex;

    use super::*;
    use crate::Catalog;

    #[test]
    fn published_mismatches_are_findings() {
        let catalog = Catalog::standard().unwrap();
        let outcome = HashCheck::new(&catalog.digests, HashMismatchPolicy::EvaluateAll)
            .execute()
            .unwrap();

        // Tiger and RIPEMD-320 literals disagree with the algorithms; RIPEMD-128 matches.
        assert_eq!(outcome.comparisons.len(), 3);
        assert_eq!(outcome.findings.len(), 2);
        assert!(outcome.comparisons[2].matched);
        assert_eq!(outcome.skipped, 0);
        assert!(!outcome.passed());
    }

    #[test]
    fn matching_vector_is_probed() {
        let catalog = Catalog::standard().unwrap();
        let outcome = HashCheck::new(&catalog.digests, HashMismatchPolicy::EvaluateAll)
            .execute()
            .unwrap();

        assert_eq!(outcome.perturbations.len(), 1);
        assert_eq!(
            outcome.perturbations[0].perturbed,
            hex!("8825697056FC78BD 39050020ED204A94").to_vec()
        );
    }

    #[test]
    fn stop_on_first_skips_the_rest() {
        let catalog = Catalog::standard().unwrap();
        let outcome = HashCheck::new(&catalog.digests, HashMismatchPolicy::StopOnFirst)
            .execute()
            .unwrap();

        assert_eq!(outcome.comparisons.len(), 1);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.skipped, 2);
    }

    #[test]
    fn corrected_vectors_pass() {
        let vectors = vec![
            DigestVector {
                algorithm: HashAlgorithm::Tiger,
                text: hex!("FACE000004050607 08090A0B0C0D00").to_vec(),
                expected: hex!("8382E989E8F14D0C 95D104A3C895C8D5 929805105219FC83").to_vec(),
            },
            DigestVector {
                algorithm: HashAlgorithm::Ripemd320,
                text: hex!("ABBA000004050607 08090A0B0C0D50").to_vec(),
                expected: hex!(
                    "CBFE2C7ACAD647CB 79A01AC7B8A0FCE5 3C18E4548BB4264A 7C539E50C1858242 C9B8A53E4C9C5334"
                )
                .to_vec(),
            },
        ];

        let outcome =
            HashCheck::new(&vectors, HashMismatchPolicy::StopOnFirst).execute().unwrap();
        assert!(outcome.passed(), "{outcome:?}");
        assert_eq!(
            outcome.perturbations[0].perturbed,
            hex!("F80FB21E3EC3CE51 849075E1198231E7 6B8288088920CA6B").to_vec()
        );
        assert_eq!(outcome.perturbations[1].divergence.differing_bytes, 40);
    }
}
