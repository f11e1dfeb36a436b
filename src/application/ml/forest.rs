//! Bagged decision-tree ensemble with a positive-class probability estimate.
//!
//! Each tree is a smartcore `DecisionTreeClassifier` fitted on a seeded
//! bootstrap sample of the training rows. The churn probability of a row is
//! the mean over trees of each tree's positive-class probability.

use crate::domain::errors::{PredictionError, TrainingError};
use crate::domain::ml::{DECISION_THRESHOLD, FeatureVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};

/// One member of the ensemble, over scaled feature rows with 0/1 labels.
pub type ChurnTree = DecisionTreeClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Column of `predict_proba` holding churn = 1. Tree classes are the sorted
/// unique labels and every bootstrap sample carries both.
const POSITIVE_CLASS: usize = 1;

/// Redraws allowed for a bootstrap sample that misses a label.
const MAX_BOOTSTRAP_DRAWS: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct ForestParameters {
    pub n_trees: u16,
    pub max_depth: u16,
    pub min_samples_split: usize,
    pub seed: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChurnForest {
    trees: Vec<ChurnTree>,
}

/// Builds a smartcore matrix from feature rows.
pub fn feature_matrix(rows: &[FeatureVector]) -> Result<DenseMatrix<f64>, String> {
    let data: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
    DenseMatrix::from_2d_vec(&data).map_err(|e| format!("Matrix creation failed: {}", e))
}

fn has_both_labels(sample: &[usize], labels: &[i32]) -> bool {
    sample.iter().any(|&i| labels[i] == 0) && sample.iter().any(|&i| labels[i] == 1)
}

/// Draws `labels.len()` row indices with replacement, retrying until both
/// labels are present.
fn bootstrap_sample(labels: &[i32], rng: &mut StdRng) -> Result<Vec<usize>, TrainingError> {
    let n = labels.len();
    for _ in 0..MAX_BOOTSTRAP_DRAWS {
        let sample: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
        if has_both_labels(&sample, labels) {
            return Ok(sample);
        }
    }
    Err(TrainingError::FitFailed {
        reason: format!(
            "no bootstrap sample with both labels after {} draws",
            MAX_BOOTSTRAP_DRAWS
        ),
    })
}

impl ChurnForest {
    /// Fits `n_trees` trees on bootstrap samples of already scaled rows.
    /// Same rows, labels and seed give the same forest.
    pub fn fit(
        rows: &[FeatureVector],
        labels: &[i32],
        params: &ForestParameters,
    ) -> Result<Self, TrainingError> {
        if rows.len() != labels.len() {
            return Err(TrainingError::InvalidDataset {
                reason: format!("{} rows but {} labels", rows.len(), labels.len()),
            });
        }
        if labels.iter().any(|&l| l != 0 && l != 1) || !(labels.contains(&0) && labels.contains(&1))
        {
            return Err(TrainingError::InvalidDataset {
                reason: "labels must be 0/1 with both classes present".to_string(),
            });
        }
        if params.n_trees == 0 {
            return Err(TrainingError::FitFailed {
                reason: "forest needs at least one tree".to_string(),
            });
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(usize::from(params.n_trees));

        for t in 0..params.n_trees {
            let sample = bootstrap_sample(labels, &mut rng)?;
            let x_rows: Vec<FeatureVector> = sample.iter().map(|&i| rows[i]).collect();
            let y: Vec<i32> = sample.iter().map(|&i| labels[i]).collect();
            let x = feature_matrix(&x_rows).map_err(|reason| TrainingError::FitFailed { reason })?;

            let tree_params = DecisionTreeClassifierParameters {
                seed: Some(params.seed.wrapping_add(u64::from(t))),
                ..DecisionTreeClassifierParameters::default()
            }
            .with_max_depth(params.max_depth)
            .with_min_samples_split(params.min_samples_split);

            let tree = ChurnTree::fit(&x, &y, tree_params).map_err(|e| TrainingError::FitFailed {
                reason: format!("tree {}: {}", t, e),
            })?;
            trees.push(tree);
        }

        Ok(Self { trees })
    }

    pub fn trees(&self) -> &[ChurnTree] {
        &self.trees
    }

    /// Mean positive-class probability over all trees, one value per row.
    pub fn churn_probabilities(&self, x: &DenseMatrix<f64>) -> Result<Vec<f64>, PredictionError> {
        if self.trees.is_empty() {
            return Err(PredictionError::InferenceFailed {
                reason: "forest has no trees".to_string(),
            });
        }

        let (n_rows, _) = x.shape();
        let mut sums = vec![0.0; n_rows];

        for tree in &self.trees {
            let proba = tree
                .predict_proba(x)
                .map_err(|e| PredictionError::InferenceFailed {
                    reason: format!("Prediction failed: {}", e),
                })?;

            let (rows, cols) = proba.shape();
            if rows != n_rows || cols != 2 {
                return Err(PredictionError::InferenceFailed {
                    reason: format!(
                        "expected a {}x2 probability matrix, got {}x{}",
                        n_rows, rows, cols
                    ),
                });
            }

            for (i, sum) in sums.iter_mut().enumerate() {
                *sum += *proba.get((i, POSITIVE_CLASS));
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(sums.into_iter().map(|s| s / n_trees).collect())
    }

    /// Labels at the serving threshold (`p > 0.5` is churn).
    pub fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i32>, PredictionError> {
        Ok(self
            .churn_probabilities(x)?
            .into_iter()
            .map(|p| i32::from(p > DECISION_THRESHOLD))
            .collect())
    }
}
