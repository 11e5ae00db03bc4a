//! Run configuration.

/// What the hash check does after a digest mismatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashMismatchPolicy {
    /// Evaluate and report every vector.
    #[default]
    EvaluateAll,
    /// Skip the remaining vectors after the first mismatch.
    StopOnFirst,
}

/// Seed for the RNG that fills RSA PKCS#1 padding.
pub const DEFAULT_RSA_SEED: u64 = 17;

/// Options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Hash check behavior on mismatch.
    pub hash_policy: HashMismatchPolicy,
    /// Seed for RSA padding randomness.
    pub rsa_seed: u64,
    /// Run the Blowfish key-strength self-test first.
    pub preflight: bool,
    /// Check names to run; empty runs all. Matched case-insensitively.
    pub only: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            hash_policy: HashMismatchPolicy::default(),
            rsa_seed: DEFAULT_RSA_SEED,
            preflight: true,
            only: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Whether the check called `name` is selected.
    pub fn selects(&self, name: &str) -> bool {
        self.only.is_empty() || self.only.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Entries of `only` that match none of `names`.
    pub fn unmatched<'c>(&'c self, names: &[&str]) -> Vec<&'c str> {
        self.only
            .iter()
            .filter(|n| !names.iter().any(|name| n.eq_ignore_ascii_case(name)))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_selects_everything() {
        assert!(RunConfig::default().selects("HashCheck"));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let config = RunConfig { only: vec!["hashcheck".to_string()], ..Default::default() };
        assert!(config.selects("HashCheck"));
        assert!(!config.selects("MacCheck"));
    }

    #[test]
    fn misspelled_names_are_unmatched() {
        let config = RunConfig {
            only: vec!["hashcheck".to_string(), "MacChek".to_string()],
            ..Default::default()
        };
        assert_eq!(config.unmatched(&["HashCheck", "MacCheck"]), vec!["MacChek"]);
        assert!(RunConfig::default().unmatched(&["HashCheck"]).is_empty());
    }
}
