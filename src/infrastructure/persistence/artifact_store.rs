//! On-disk storage for the classifier / scaler artifact pair.
//!
//! Both halves are JSON documents carrying the same `ModelMetadata`, written
//! to fixed names inside one model directory. Loading checks that the stored
//! feature schema equals the serving schema and that both halves come from
//! the same training run.

use crate::application::ml::ChurnModel;
use crate::application::ml::forest::ChurnForest;
use crate::domain::errors::{ArtifactError, TrainingError};
use crate::domain::ml::{FeatureScaler, ModelMetadata};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CLASSIFIER_FILE: &str = "churn_model.json";
pub const SCALER_FILE: &str = "scaler.json";

#[derive(Serialize)]
struct ArtifactRef<'a, T> {
    metadata: &'a ModelMetadata,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Artifact<T> {
    metadata: ModelMetadata,
    payload: T,
}

/// Handles persistence of fitted models to a model directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.dir.join(CLASSIFIER_FILE)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(SCALER_FILE)
    }

    /// Writes both artifacts, creating the directory if needed.
    pub fn save(&self, model: &ChurnModel) -> Result<(), TrainingError> {
        fs::create_dir_all(&self.dir).map_err(|source| TrainingError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let metadata = model.metadata();
        write_atomic(
            &self.classifier_path(),
            &ArtifactRef {
                metadata,
                payload: model.classifier(),
            },
        )?;
        write_atomic(
            &self.scaler_path(),
            &ArtifactRef {
                metadata,
                payload: model.scaler(),
            },
        )?;

        info!(
            "Saved churn model (run {}) to {:?}",
            metadata.run_id, self.dir
        );
        Ok(())
    }

    /// Reads and cross-checks the artifact pair.
    pub fn load(&self) -> Result<ChurnModel, ArtifactError> {
        let classifier: Artifact<ChurnForest> = read_artifact(&self.classifier_path())?;
        let scaler: Artifact<FeatureScaler> = read_artifact(&self.scaler_path())?;

        classifier.metadata.check_schema()?;
        scaler.metadata.check_schema()?;
        classifier.metadata.check_same_run(&scaler.metadata)?;

        Ok(ChurnModel::new(
            classifier.payload,
            scaler.payload,
            classifier.metadata,
        ))
    }
}

/// Atomic write: serialize, write to a temp sibling, then rename over the target.
fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), TrainingError> {
    let content = serde_json::to_vec(value)?;
    let temp_path = path.with_extension("json.tmp");

    let result = fs::write(&temp_path, content).and_then(|_| fs::rename(&temp_path, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(TrainingError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<Artifact<T>, ArtifactError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ArtifactError::Missing {
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("unreadable: {}", e),
        },
    })?;

    serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        reason: format!("failed to parse: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::synthetic_data;
    use crate::application::ml::trainer::{ChurnTrainer, TrainingConfig};
    use crate::domain::ml::FeatureVector;

    fn trained() -> ChurnModel {
        let config = TrainingConfig {
            n_trees: 8,
            max_depth: 5,
            ..TrainingConfig::default()
        };
        ChurnTrainer::new(config)
            .train(&synthetic_data::generate(150, 21))
            .unwrap()
            .model
    }

    #[test]
    fn test_save_creates_directory_and_both_files() {
        let root = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(root.path().join("nested").join("models"));
        store.save(&trained()).unwrap();

        assert!(store.classifier_path().exists());
        assert!(store.scaler_path().exists());
        assert!(!store.classifier_path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_round_trip_preserves_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let model = trained();
        store.save(&model).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.metadata(), model.metadata());
        assert_eq!(loaded.scaler(), model.scaler());
        for row in synthetic_data::generate(20, 77) {
            let fv = FeatureVector::from(&row);
            assert_eq!(
                loaded.churn_probability(&fv).unwrap(),
                model.churn_probability(&fv).unwrap()
            );
        }
    }

    #[test]
    fn test_missing_scaler_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        store.save(&trained()).unwrap();
        fs::remove_file(store.scaler_path()).unwrap();

        assert!(matches!(store.load(), Err(ArtifactError::Missing { .. })));
    }

    #[test]
    fn test_garbage_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        store.save(&trained()).unwrap();
        fs::write(store.classifier_path(), b"{not json").unwrap();

        assert!(matches!(store.load(), Err(ArtifactError::Corrupt { .. })));
    }

    #[test]
    fn test_pair_from_different_runs_is_rejected() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let store_a = ArtifactStore::new(dir_a.path());
        let store_b = ArtifactStore::new(dir_b.path());
        store_a.save(&trained()).unwrap();
        store_b.save(&trained()).unwrap();

        fs::copy(store_b.scaler_path(), store_a.scaler_path()).unwrap();

        assert!(matches!(store_a.load(), Err(ArtifactError::Mismatch { .. })));
    }

    #[test]
    fn test_unwritable_target_is_a_training_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("models");
        fs::write(&blocker, b"a file, not a directory").unwrap();

        let err = ArtifactStore::new(&blocker).save(&trained()).unwrap_err();
        assert!(matches!(err, TrainingError::Io { .. }));
    }
}
