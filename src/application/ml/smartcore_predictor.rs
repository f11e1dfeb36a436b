use super::model::ChurnModel;
use super::predictor::{ChurnPredictor, ModelStatus};
use crate::domain::customer::CustomerRecord;
use crate::domain::errors::{ArtifactError, PredictionError};
use crate::domain::ml::PredictionResult;
use crate::infrastructure::persistence::ArtifactStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// What `load` found on disk.
#[derive(Debug, Clone)]
pub enum ModelState {
    NotLoaded,
    Missing { path: PathBuf },
    Corrupt { reason: String },
    Available(Arc<ChurnModel>),
}

/// Predictor handle over a smartcore random forest.
///
/// Built once at startup and never mutated afterwards. A failed load leaves
/// the handle unavailable instead of aborting the process, so the service can
/// still answer health checks.
#[derive(Debug, Clone)]
pub struct SmartCorePredictor {
    state: ModelState,
}

impl Default for SmartCorePredictor {
    fn default() -> Self {
        Self {
            state: ModelState::NotLoaded,
        }
    }
}

impl SmartCorePredictor {
    pub fn load(store: &ArtifactStore) -> Self {
        let state = match store.load() {
            Ok(model) => {
                info!(
                    "Successfully loaded churn model (run {}) from {:?}",
                    model.metadata().run_id,
                    store.dir()
                );
                ModelState::Available(Arc::new(model))
            }
            Err(ArtifactError::Missing { path }) => {
                warn!(
                    "ML Model artifact not found at {:?}. Predictions will be refused.",
                    path
                );
                ModelState::Missing { path }
            }
            Err(e) => {
                error!("Failed to load churn model: {}", e);
                ModelState::Corrupt {
                    reason: e.to_string(),
                }
            }
        };
        Self { state }
    }

    pub fn from_model(model: ChurnModel) -> Self {
        Self {
            state: ModelState::Available(Arc::new(model)),
        }
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn model(&self) -> Option<&Arc<ChurnModel>> {
        match &self.state {
            ModelState::Available(model) => Some(model),
            _ => None,
        }
    }
}

impl ChurnPredictor for SmartCorePredictor {
    fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult, PredictionError> {
        match &self.state {
            ModelState::Available(model) => model.predict(record),
            ModelState::NotLoaded => Err(PredictionError::ModelUnavailable {
                reason: "model not loaded".to_string(),
            }),
            ModelState::Missing { path } => Err(PredictionError::ModelUnavailable {
                reason: format!("model artifact missing at {:?}", path),
            }),
            ModelState::Corrupt { reason } => Err(PredictionError::ModelUnavailable {
                reason: format!("model artifact corrupt: {}", reason),
            }),
        }
    }

    fn status(&self) -> ModelStatus {
        match &self.state {
            ModelState::NotLoaded => ModelStatus::NotLoaded,
            ModelState::Missing { path } => ModelStatus::Missing(format!("{:?}", path)),
            ModelState::Corrupt { reason } => ModelStatus::Corrupt(reason.clone()),
            ModelState::Available(model) => ModelStatus::Available {
                run_id: model.metadata().run_id,
            },
        }
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest Classifier"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::synthetic_data;
    use crate::application::ml::trainer::{ChurnTrainer, TrainingConfig};

    fn customer() -> CustomerRecord {
        synthetic_data::generate(1, 99)[0].to_customer("C-7")
    }

    #[test]
    fn test_default_handle_refuses_to_predict() {
        let predictor = SmartCorePredictor::default();
        assert!(!predictor.is_available());
        assert_eq!(predictor.status(), ModelStatus::NotLoaded);
        assert!(matches!(
            predictor.predict(&customer()),
            Err(PredictionError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn test_loading_from_empty_dir_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = SmartCorePredictor::load(&ArtifactStore::new(dir.path()));
        assert!(matches!(predictor.state(), ModelState::Missing { .. }));
        assert_eq!(predictor.status().label(), "missing");
        let err = predictor.predict(&customer()).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_in_memory_model_is_available() {
        let config = TrainingConfig {
            n_trees: 5,
            max_depth: 4,
            ..TrainingConfig::default()
        };
        let trained = ChurnTrainer::new(config)
            .train(&synthetic_data::generate(120, 11))
            .unwrap();
        let predictor = SmartCorePredictor::from_model(trained.model);

        assert!(predictor.is_available());
        let result = predictor.predict(&customer()).unwrap();
        assert_eq!(result.customer_id, "C-7");
        assert!((0.0..=1.0).contains(&result.churn_probability));
    }

    #[test]
    fn test_invalid_input_is_not_masked() {
        let config = TrainingConfig {
            n_trees: 5,
            max_depth: 4,
            ..TrainingConfig::default()
        };
        let trained = ChurnTrainer::new(config)
            .train(&synthetic_data::generate(120, 11))
            .unwrap();
        let predictor = SmartCorePredictor::from_model(trained.model);

        let mut record = customer();
        record.estimated_salary = f64::INFINITY;
        assert!(matches!(
            predictor.predict(&record),
            Err(PredictionError::InvalidInput { .. })
        ));
    }
}
