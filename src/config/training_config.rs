//! Training configuration parsing from environment variables.
//!
//! Defaults reproduce the reference training run: 100 trees, depth 10,
//! seed 42, 20% hold-out, 10000 synthetic rows.

use crate::application::ml::TrainingConfig;
use crate::application::ml::synthetic_data::DEFAULT_SAMPLES;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Training environment configuration
#[derive(Debug, Clone)]
pub struct TrainingEnvConfig {
    pub n_trees: u16,
    pub max_depth: u16,
    pub min_samples_split: usize,
    pub seed: u64,
    pub test_ratio: f64,
    /// Row count when training on generated data
    pub samples: usize,
}

impl Default for TrainingEnvConfig {
    fn default() -> Self {
        let t = TrainingConfig::default();
        Self {
            n_trees: t.n_trees,
            max_depth: t.max_depth,
            min_samples_split: t.min_samples_split,
            seed: t.seed,
            test_ratio: t.test_ratio,
            samples: DEFAULT_SAMPLES,
        }
    }
}

impl TrainingEnvConfig {
    pub fn from_env() -> Result<Self> {
        let d = Self::default();
        let config = Self {
            n_trees: Self::parse("TRAINING_N_TREES", d.n_trees)?,
            max_depth: Self::parse("TRAINING_MAX_DEPTH", d.max_depth)?,
            min_samples_split: Self::parse("TRAINING_MIN_SAMPLES_SPLIT", d.min_samples_split)?,
            seed: Self::parse("TRAINING_SEED", d.seed)?,
            test_ratio: Self::parse("TRAINING_TEST_RATIO", d.test_ratio)?,
            samples: Self::parse("TRAINING_SAMPLES", d.samples)?,
        };

        if !(config.test_ratio > 0.0 && config.test_ratio < 1.0) {
            anyhow::bail!(
                "TRAINING_TEST_RATIO must be between 0 and 1 (exclusive), got {}",
                config.test_ratio
            );
        }
        if config.n_trees == 0 {
            anyhow::bail!("TRAINING_N_TREES must be at least 1");
        }

        Ok(config)
    }

    fn parse<T>(key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match env::var(key) {
            Ok(raw) => raw
                .parse::<T>()
                .with_context(|| format!("Failed to parse {}: {}", key, raw)),
            Err(_) => Ok(default),
        }
    }

    pub fn to_training_config(&self) -> TrainingConfig {
        TrainingConfig {
            n_trees: self.n_trees,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            seed: self.seed,
            test_ratio: self.test_ratio,
        }
    }
}
