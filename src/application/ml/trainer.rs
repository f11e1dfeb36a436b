use super::evaluation::ClassificationReport;
use super::forest::{ChurnForest, ForestParameters, feature_matrix};
use super::model::ChurnModel;
use crate::domain::customer::LabeledRecord;
use crate::domain::errors::TrainingError;
use crate::domain::ml::{FeatureScaler, FeatureVector, ModelMetadata};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

/// Hyper-parameters of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub n_trees: u16,
    pub max_depth: u16,
    pub min_samples_split: usize,
    pub seed: u64,
    /// Fraction of rows held out for evaluation, in (0, 1).
    pub test_ratio: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 2,
            seed: 42,
            test_ratio: 0.2,
        }
    }
}

/// Output of a training run: the fitted pair plus its hold-out report.
#[derive(Debug)]
pub struct TrainedModel {
    pub model: ChurnModel,
    pub report: ClassificationReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Deterministic shuffled split. The test side gets `ceil(n * test_ratio)` rows.
pub fn train_test_split(
    n: usize,
    test_ratio: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), TrainingError> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(TrainingError::InvalidDataset {
            reason: format!("test ratio must be in (0, 1), got {}", test_ratio),
        });
    }

    let n_test = (n as f64 * test_ratio).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(TrainingError::InvalidDataset {
            reason: format!("{} rows cannot be split with test ratio {}", n, test_ratio),
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}

fn validate_rows(dataset: &[LabeledRecord]) -> Result<(), TrainingError> {
    if dataset.is_empty() {
        return Err(TrainingError::InvalidDataset {
            reason: "dataset is empty".to_string(),
        });
    }

    for (i, row) in dataset.iter().enumerate() {
        if row.churn > 1 || row.credit_card > 1 || row.active_member > 1 {
            return Err(TrainingError::InvalidDataset {
                reason: format!("row {}: binary column outside {{0, 1}}", i),
            });
        }
        if FeatureVector::from(row).values().iter().any(|v| !v.is_finite()) {
            return Err(TrainingError::InvalidDataset {
                reason: format!("row {}: non-finite attribute", i),
            });
        }
    }
    Ok(())
}

pub struct ChurnTrainer {
    config: TrainingConfig,
}

impl Default for ChurnTrainer {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

impl ChurnTrainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Split, fit the scaler on the training side, fit the forest on scaled
    /// rows, then score the scaled hold-out rows.
    pub fn train(&self, dataset: &[LabeledRecord]) -> Result<TrainedModel, TrainingError> {
        validate_rows(dataset)?;

        let (train_idx, test_idx) =
            train_test_split(dataset.len(), self.config.test_ratio, self.config.seed)?;
        debug!(
            "Split {} rows into {} train / {} test",
            dataset.len(),
            train_idx.len(),
            test_idx.len()
        );

        let features = |idx: &[usize]| -> Vec<FeatureVector> {
            idx.iter().map(|&i| FeatureVector::from(&dataset[i])).collect()
        };
        let labels = |idx: &[usize]| -> Vec<i32> {
            idx.iter().map(|&i| i32::from(dataset[i].churn)).collect()
        };

        let x_train_raw = features(train_idx.as_slice());
        let x_test_raw = features(test_idx.as_slice());
        let y_train = labels(train_idx.as_slice());
        let y_test = labels(test_idx.as_slice());

        if !(y_train.contains(&0) && y_train.contains(&1)) {
            return Err(TrainingError::InvalidDataset {
                reason: "training partition must contain both churn labels".to_string(),
            });
        }

        let scaler = FeatureScaler::fit(&x_train_raw)?;
        let x_train = scaler.transform_all(&x_train_raw);
        let x_test = feature_matrix(&scaler.transform_all(&x_test_raw))
            .map_err(|reason| TrainingError::FitFailed { reason })?;

        let params = ForestParameters {
            n_trees: self.config.n_trees,
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            seed: self.config.seed,
        };

        info!(
            "Training Random Forest Classifier (Trees: {}, Depth: {}, MinSplit: {}, Seed: {}) on {} samples...",
            self.config.n_trees,
            self.config.max_depth,
            self.config.min_samples_split,
            self.config.seed,
            train_idx.len()
        );

        let classifier = ChurnForest::fit(&x_train, &y_train, &params)?;

        let y_pred = classifier
            .predict(&x_test)
            .map_err(|e| TrainingError::FitFailed {
                reason: e.to_string(),
            })?;
        let report = ClassificationReport::from_predictions(&y_test, &y_pred);
        info!(
            "Hold-out evaluation (n={}): accuracy={:.4}, churn F1={:.4}",
            test_idx.len(),
            report.accuracy,
            report.per_class[1].f1
        );

        let metadata = ModelMetadata::new_run(
            self.config.n_trees,
            self.config.max_depth,
            self.config.seed,
            train_idx.len(),
        );

        Ok(TrainedModel {
            model: ChurnModel::new(classifier, scaler, metadata),
            report,
            train_rows: train_idx.len(),
            test_rows: test_idx.len(),
        })
    }
}
