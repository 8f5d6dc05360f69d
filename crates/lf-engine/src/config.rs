use std::path::Path;

use lf_core::{ContextSettings, Verbosity};
use lf_schedule::SchedulerConfig;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Configuration for a game session.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "seed": 7, "verbosity": "verbose" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// RNG seed for actors.
    pub seed: u64,
    /// Heaviest load the player can carry.
    pub max_carry_weight: u32,
    /// Chronometer minutes per consumed turn.
    pub minutes_per_turn: u64,
    /// Chronometer minutes past midnight at the start.
    pub start_minutes: u64,
    /// Initial room description verbosity.
    pub verbosity: Verbosity,
    /// Whether a registered actor with no implementation is a fault.
    pub strict_actors: bool,
    /// Invalid answers to a disambiguation prompt tolerated before it is
    /// dropped.
    pub disambiguation_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_carry_weight: 10,
            minutes_per_turn: 54,
            start_minutes: 8 * 60,
            verbosity: Verbosity::Brief,
            strict_actors: true,
            disambiguation_retries: 1,
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the carry limit.
    pub fn with_max_carry_weight(mut self, weight: u32) -> Self {
        self.max_carry_weight = weight;
        self
    }

    /// Set the initial verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set how many bad answers a disambiguation prompt tolerates.
    pub fn with_disambiguation_retries(mut self, retries: u32) -> Self {
        self.disambiguation_retries = retries;
        self
    }

    /// Parse a JSON config.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    fn validate(&self) -> EngineResult<()> {
        if self.minutes_per_turn == 0 {
            return Err(EngineError::Config("minutes_per_turn must be positive".into()));
        }
        if self.max_carry_weight == 0 {
            return Err(EngineError::Config("max_carry_weight must be positive".into()));
        }
        Ok(())
    }

    /// Settings for the player context.
    pub fn context_settings(&self) -> ContextSettings {
        ContextSettings {
            start_minutes: self.start_minutes,
            minutes_per_turn: self.minutes_per_turn,
            max_carry_weight: self.max_carry_weight,
            verbosity: self.verbosity,
        }
    }

    /// Settings for the turn scheduler.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::default()
            .with_seed(self.seed)
            .with_strict(self.strict_actors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.max_carry_weight, 10);
        assert_eq!(config.minutes_per_turn, 54);
        assert_eq!(config.disambiguation_retries, 1);
        assert!(config.strict_actors);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "seed": 7, "verbosity": "verbose" }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.max_carry_weight, 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "sed": 7 }"#),
            Err(EngineError::Json(_))
        ));
    }

    #[test]
    fn zero_turn_length_is_rejected() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "minutes_per_turn": 0 }"#),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, r#"{ "max_carry_weight": 4 }"#).unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.max_carry_weight, 4);
        assert_eq!(config.context_settings().max_carry_weight, 4);
    }

    #[test]
    fn builder_feeds_scheduler() {
        let config = EngineConfig::default().with_seed(9);
        assert_eq!(config.scheduler_config().seed, 9);
    }
}
