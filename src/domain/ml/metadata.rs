use super::feature_registry::{self, FEATURE_NAMES};
use crate::domain::errors::ArtifactError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provenance block written into both halves of an artifact pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub run_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub feature_names: Vec<String>,
    pub schema_fingerprint: String,
    pub n_trees: u16,
    pub max_depth: u16,
    pub seed: u64,
    pub training_rows: usize,
}

impl ModelMetadata {
    /// Starts a new training run against the current feature schema.
    pub fn new_run(n_trees: u16, max_depth: u16, seed: u64, training_rows: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            feature_names: feature_registry::feature_names(),
            schema_fingerprint: feature_registry::schema_fingerprint(),
            n_trees,
            max_depth,
            seed,
            training_rows,
        }
    }

    /// Fails unless the stored schema equals the compiled-in `FEATURE_NAMES`.
    pub fn check_schema(&self) -> Result<(), ArtifactError> {
        let names_match = self.feature_names.len() == FEATURE_NAMES.len()
            && self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES.iter())
                .all(|(a, b)| a == b);

        if !names_match {
            return Err(ArtifactError::Mismatch {
                reason: format!(
                    "feature schema {:?} does not match serving schema {:?}",
                    self.feature_names, FEATURE_NAMES
                ),
            });
        }

        if self.schema_fingerprint != feature_registry::fingerprint_of(&self.feature_names) {
            return Err(ArtifactError::Mismatch {
                reason: "schema fingerprint does not match stored feature names".to_string(),
            });
        }

        Ok(())
    }

    /// Fails unless both artifacts were produced by the same training run.
    pub fn check_same_run(&self, other: &ModelMetadata) -> Result<(), ArtifactError> {
        if self.run_id != other.run_id {
            return Err(ArtifactError::Mismatch {
                reason: format!(
                    "classifier from run {} paired with scaler from run {}",
                    self.run_id, other.run_id
                ),
            });
        }
        Ok(())
    }
}
