use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scoring a customer
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Inference failed: {reason}")]
    InferenceFailed { reason: String },
}

/// Errors raised by a training run
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Training IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    #[error("Model fitting failed: {reason}")]
    FitFailed { reason: String },

    #[error("Artifact serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while reading a persisted artifact pair
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {path:?}")]
    Missing { path: PathBuf },

    #[error("Artifact {path:?} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Artifact pair mismatch: {reason}")]
    Mismatch { reason: String },
}
