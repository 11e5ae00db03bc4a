//! Sequential check runner.
//!
//! Runs each check once, in order, and keeps going when one fails: the error
//! is logged with the check's name and ordinal and stored in the report.

use crate::{
    Catalog, CheckError, CheckOutcome, RunConfig,
    checks::{
        AsymmetricCheck, Check, HashCheck, MacCheck, SymmetricDecryptCheck, SymmetricEncryptCheck,
    },
    preflight::{self, PreflightReport},
};

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEntry {
    /// Check name.
    pub name: &'static str,
    /// 1-based position in the run.
    pub ordinal: usize,
    /// What the check returned.
    pub result: Result<CheckOutcome, CheckError>,
}

impl RunEntry {
    /// The check returned an outcome and that outcome passed.
    pub fn passed(&self) -> bool {
        self.result.as_ref().is_ok_and(CheckOutcome::passed)
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Preflight results, if the self-test ran.
    pub preflight: Option<PreflightReport>,
    /// One entry per check, in run order.
    pub entries: Vec<RunEntry>,
}

impl RunReport {
    /// Every check passed. Preflight failures do not count.
    pub fn all_passed(&self) -> bool {
        self.entries.iter().all(RunEntry::passed)
    }

    /// Number of checks that passed.
    pub fn passed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.passed()).count()
    }

    /// Number of checks that failed or found a mismatch.
    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.passed_count()
    }

    /// Entry for the check called `name`.
    pub fn entry(&self, name: &str) -> Option<&RunEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Ordered set of checks.
pub struct Runner<'a> {
    checks: Vec<Box<dyn Check + 'a>>,
    preflight: bool,
}

impl<'a> Runner<'a> {
    /// Runner with no checks.
    pub fn new(preflight: bool) -> Self {
        Self { checks: Vec::new(), preflight }
    }

    /// The five standard checks over `catalog`, filtered by `config.only`.
    ///
    /// Each `only` entry naming no standard check is logged as a warning.
    pub fn standard(catalog: &'a Catalog, config: &RunConfig) -> Self {
        let all: [Box<dyn Check + 'a>; 5] = [
            Box::new(SymmetricEncryptCheck::new(&catalog.symmetric_encrypt)),
            Box::new(SymmetricDecryptCheck::new(&catalog.symmetric_decrypt)),
            Box::new(HashCheck::new(&catalog.digests, config.hash_policy)),
            Box::new(MacCheck::new(&catalog.macs)),
            Box::new(AsymmetricCheck::new(&catalog.asymmetric, config.rsa_seed)),
        ];

        let names: Vec<_> = all.iter().map(|c| c.name()).collect();
        for name in config.unmatched(&names) {
            tracing::warn!("--only {} matches no check", name);
        }

        let mut runner = Self::new(config.preflight);
        for check in all {
            if config.selects(check.name()) {
                runner.push(check);
            } else {
                tracing::debug!("Skipping {} (not selected)", check.name());
            }
        }
        runner
    }

    /// Append a check.
    pub fn push(&mut self, check: Box<dyn Check + 'a>) {
        self.checks.push(check);
    }

    /// Append a check, builder style.
    #[must_use]
    pub fn with_check(mut self, check: impl Check + 'a) -> Self {
        self.push(Box::new(check));
        self
    }

    /// Names of the checks, in run order.
    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run the preflight self-test if enabled, then every check in order.
    pub fn run(&self) -> RunReport {
        let preflight = self.preflight.then(preflight::run);

        let entries = self
            .checks
            .iter()
            .enumerate()
            .map(|(index, check)| {
                let name = check.name();
                let ordinal = index + 1;
                tracing::info!("Running {} (No. {})", name, ordinal);

                let result = check.execute();
                match &result {
                    Ok(outcome) if outcome.passed() => {
                        tracing::info!("{} (No. {}) passed", name, ordinal);
                    },
                    Ok(outcome) => tracing::warn!(
                        "{} (No. {}) finished with {} finding(s), {} skipped",
                        name,
                        ordinal,
                        outcome.findings.len(),
                        outcome.skipped
                    ),
                    Err(err) => tracing::error!(
                        "{} (No. {}) failed with {}: {}",
                        name,
                        ordinal,
                        err.kind(),
                        err
                    ),
                }

                RunEntry { name, ordinal, result }
            })
            .collect();

        RunReport { preflight, entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Check for Failing {
        fn name(&self) -> &'static str {
            "Failing"
        }

        fn execute(&self) -> Result<CheckOutcome, CheckError> {
            Err(CheckError::MissingExpectedError {
                perturbation: "nothing".to_string(),
                expected: "InvalidInputLength",
            })
        }
    }

    #[test]
    fn standard_order() {
        let catalog = Catalog::standard().unwrap();
        let runner = Runner::standard(&catalog, &RunConfig::default());

        assert_eq!(
            runner.names(),
            vec![
                "SymmetricEncryptCheck",
                "SymmetricDecryptCheck",
                "HashCheck",
                "MacCheck",
                "AsymmetricCheck"
            ]
        );
    }

    #[test]
    fn only_filter() {
        let catalog = Catalog::standard().unwrap();
        let config = RunConfig { only: vec!["maccheck".to_string()], ..Default::default() };

        assert_eq!(Runner::standard(&catalog, &config).names(), vec!["MacCheck"]);
    }

    #[test]
    fn failure_does_not_stop_the_run() {
        let catalog = Catalog::standard().unwrap();
        let report = Runner::new(false)
            .with_check(Failing)
            .with_check(SymmetricEncryptCheck::new(&catalog.symmetric_encrypt))
            .run();

        assert_eq!(report.entries.len(), 2);
        assert!(report.entries[0].result.is_err());
        assert_eq!(report.entries[1].ordinal, 2);
        assert!(report.entries[1].passed());
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_passed());
        assert!(report.preflight.is_none());
    }

    #[test]
    fn standard_run_reports_catalog_mismatches() {
        let catalog = Catalog::standard().unwrap();
        let report = Runner::standard(&catalog, &RunConfig::default()).run();

        assert!(report.preflight.as_ref().is_some_and(PreflightReport::passed));
        assert!(report.entry("SymmetricEncryptCheck").is_some_and(RunEntry::passed));
        assert!(report.entry("SymmetricDecryptCheck").is_some_and(RunEntry::passed));
        assert!(report.entry("AsymmetricCheck").is_some_and(RunEntry::passed));
        assert!(!report.entry("HashCheck").is_some_and(RunEntry::passed));
        assert!(!report.entry("MacCheck").is_some_and(RunEntry::passed));
        assert_eq!(report.failed_count(), 2);
    }
}
