/// Configuration for the turn scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// RNG seed handed to actors, for deterministic runs.
    pub seed: u64,
    /// Whether a roster entry with no matching actor is a fault (`true`)
    /// or is skipped with a warning.
    pub strict: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            strict: true,
        }
    }
}

impl SchedulerConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set whether unknown roster entries are faults.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SchedulerConfig::default();
        assert_eq!(config.seed, 42);
        assert!(config.strict);
    }

    #[test]
    fn config_builder_chain() {
        let config = SchedulerConfig::default().with_seed(7).with_strict(false);
        assert_eq!(config.seed, 7);
        assert!(!config.strict);
    }
}
