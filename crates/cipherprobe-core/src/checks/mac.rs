//! HMAC known-answer check.

use cipherprobe_crypto::mac;

use super::Check;
use crate::{
    CheckError, CheckOutcome, Finding, MacVector,
    codec::Hex,
    model::{Buffer, Perturbation, PerturbationResult},
};

/// Compares each MAC with its published value, then recomputes it with the
/// key cut to four fifths of its length.
#[derive(Debug, Clone, Copy)]
pub struct MacCheck<'a> {
    vectors: &'a [MacVector],
}

impl<'a> MacCheck<'a> {
    /// Check `vectors` in order.
    pub fn new(vectors: &'a [MacVector]) -> Self {
        Self { vectors }
    }
}

/// Length of the shortened key.
fn shortened(len: usize) -> usize {
    len * 4 / 5
}

impl Check for MacCheck<'_> {
    fn name(&self) -> &'static str {
        "MacCheck"
    }

    fn execute(&self) -> Result<CheckOutcome, CheckError> {
        let mut outcome = CheckOutcome::new(self.name());

        for vector in self.vectors {
            let algorithm = vector.algorithm;
            tracing::info!("Algorithm: {}", algorithm);
            tracing::info!("Key: {}", Hex(&vector.key));
            tracing::info!("Text: {}", Hex(&vector.text));

            let computed = mac(algorithm, &vector.key, &vector.text)?;
            if !outcome.compare(format!("{algorithm} MAC"), &vector.expected, &computed) {
                outcome.find(Finding::MacMismatch {
                    algorithm: algorithm.to_string(),
                    expected: Hex(&vector.expected).to_string(),
                    computed: Hex(&computed).to_string(),
                });
            }

            tracing::info!("Shortening key, computing MAC...");
            let len = vector.key.len();
            let cut = Perturbation::truncate(Buffer::Key, len, shortened(len));
            let modified = mac(algorithm, &cut.apply(&vector.key), &vector.text)?;
            outcome.probe(PerturbationResult::new(cut, computed, modified, 1));
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::Catalog;

    #[test]
    fn sha1_literal_is_the_only_mismatch() {
        let catalog = Catalog::standard().unwrap();
        let outcome = MacCheck::new(&catalog.macs).execute().unwrap();

        let matched: Vec<_> = outcome.comparisons.iter().map(|c| c.matched).collect();
        assert_eq!(matched, vec![true, true, false]);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(
            outcome.comparisons[2].computed,
            hex!("DA060A6EA9A0635A B2E6DAC2F7C55E66 D6DAAAF6").to_vec()
        );
    }

    #[test]
    fn every_vector_gets_a_key_probe() {
        let catalog = Catalog::standard().unwrap();
        let outcome = MacCheck::new(&catalog.macs).execute().unwrap();

        assert_eq!(outcome.perturbations.len(), 3);
        assert_eq!(
            outcome.perturbations[0].perturbation,
            Perturbation::truncate(Buffer::Key, 10, 8)
        );
        assert_eq!(
            outcome.perturbations[0].perturbed,
            hex!("BD646C8B16256B4A 080DDB196A636769 350A803B").to_vec()
        );
        assert_eq!(
            outcome.perturbations[1].perturbed,
            hex!(
                "D6F06C16AEA72A1B D5EEFE8B687137B7 91056BB43BE19A31 \
                 5A1E940FFE3017C4 7334CA28EDA0933C 0490D52D30465928"
            )
            .to_vec()
        );
        assert_eq!(
            outcome.perturbations[2].perturbed,
            hex!("4322BF0C3D2C0125 F87FB801F5B25F39 AEF7A42D").to_vec()
        );
    }

    #[test]
    fn shortened_length() {
        assert_eq!(shortened(10), 8);
        assert_eq!(shortened(6), 4);
        assert_eq!(shortened(1), 0);
    }
}
