//! Configuration module for the churn predictor.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Server, Model artifacts, and Training.

mod server_config;
mod training_config;

pub use server_config::ServerEnvConfig;
pub use training_config::TrainingEnvConfig;

use crate::infrastructure::persistence::ArtifactStore;
use anyhow::Result;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL_DIR: &str = "models";

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerEnvConfig,
    /// Directory holding the classifier / scaler artifact pair
    pub model_dir: PathBuf,
    pub training: TrainingEnvConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerEnvConfig::from_env()?,
            model_dir: env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_DIR)),
            training: TrainingEnvConfig::from_env()?,
        })
    }

    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.model_dir)
    }
}
