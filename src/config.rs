//! Extraction settings
//!
//! The crate never reads configuration files or the environment itself;
//! callers build an `ExtractorConfig` directly or hand in JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on pool workers unless configured otherwise
pub const DEFAULT_MAX_WORKERS: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the batch pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Worker threads; 0 picks the CPU count
    pub workers: usize,

    /// Cap applied to `workers` after resolution
    pub max_workers: usize,

    /// Report per-file progress through the pool's progress logger
    pub verbose: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            max_workers: DEFAULT_MAX_WORKERS,
            verbose: false,
        }
    }
}

impl ExtractorConfig {
    /// Parse from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ExtractorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::Invalid(
                "max_workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Worker count the pool will actually use
    pub fn resolved_workers(&self) -> usize {
        let requested = if self.workers == 0 {
            available_cpus()
        } else {
            self.workers
        };
        requested.clamp(1, self.max_workers.max(1))
    }
}

pub(crate) fn available_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.workers, 0);
        assert_eq!(config.max_workers, 16);
        assert!(!config.verbose);
    }

    #[test]
    fn test_from_json_fills_missing_keys() {
        let config = ExtractorConfig::from_json(r#"{"workers": 4}"#).unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.max_workers, DEFAULT_MAX_WORKERS);
        assert!(!config.verbose);

        let config = ExtractorConfig::from_json("{}").unwrap();
        assert_eq!(config, ExtractorConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            ExtractorConfig::from_json("{workers: 4"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ExtractorConfig::from_json(r#"{"max_workers": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_resolved_workers_is_capped() {
        let config = ExtractorConfig {
            workers: 64,
            ..Default::default()
        };
        assert_eq!(config.resolved_workers(), 16);

        let config = ExtractorConfig {
            workers: 3,
            max_workers: 2,
            verbose: true,
        };
        assert_eq!(config.resolved_workers(), 2);

        let auto = ExtractorConfig::default().resolved_workers();
        assert!((1..=16).contains(&auto));
    }
}
