use super::forest::{ChurnForest, feature_matrix};
use crate::domain::customer::CustomerRecord;
use crate::domain::errors::PredictionError;
use crate::domain::ml::{FeatureScaler, FeatureVector, ModelMetadata, PredictionResult};

/// Rejects a classifier output that is not a probability.
fn checked_probability(p: f64) -> Result<f64, PredictionError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(PredictionError::InferenceFailed {
            reason: format!("classifier returned {} outside [0, 1]", p),
        })
    }
}

/// A classifier and the scaler it was trained behind, from one training run.
///
/// Inference only borrows `&self`, so a single instance is shared across
/// request handlers behind an `Arc` without locking.
#[derive(Debug)]
pub struct ChurnModel {
    classifier: ChurnForest,
    scaler: FeatureScaler,
    metadata: ModelMetadata,
}

impl ChurnModel {
    pub fn new(classifier: ChurnForest, scaler: FeatureScaler, metadata: ModelMetadata) -> Self {
        Self {
            classifier,
            scaler,
            metadata,
        }
    }

    pub fn classifier(&self) -> &ChurnForest {
        &self.classifier
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Positive-class probability for an unscaled feature vector.
    pub fn churn_probability(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let scaled = self.scaler.transform(features);
        let input = feature_matrix(&[scaled])
            .map_err(|reason| PredictionError::InferenceFailed { reason })?;

        let probabilities = self.classifier.churn_probabilities(&input)?;
        match probabilities.as_slice() {
            [p] => checked_probability(*p),
            other => Err(PredictionError::InferenceFailed {
                reason: format!("expected one probability, got {}", other.len()),
            }),
        }
    }

    pub fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult, PredictionError> {
        record.validate()?;
        let features = FeatureVector::from(record);
        let probability = self.churn_probability(&features)?;
        Ok(PredictionResult::from_probability(
            record.customer_id.clone(),
            probability,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::synthetic_data;
    use crate::application::ml::trainer::{ChurnTrainer, TrainingConfig};
    use smartcore::linalg::basic::arrays::Array;

    #[test]
    fn test_out_of_range_probability_is_an_inference_failure() {
        assert_eq!(checked_probability(0.0).unwrap(), 0.0);
        assert_eq!(checked_probability(1.0).unwrap(), 1.0);
        for bad in [-0.01, 1.000001, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                checked_probability(bad),
                Err(PredictionError::InferenceFailed { .. })
            ));
        }
    }

    #[test]
    fn test_probability_averages_trees_on_scaled_input() {
        let config = TrainingConfig {
            n_trees: 12,
            max_depth: 6,
            ..TrainingConfig::default()
        };
        let model = ChurnTrainer::new(config)
            .train(&synthetic_data::generate(250, 8))
            .unwrap()
            .model;

        let probes = synthetic_data::generate(30, 31);
        let mut strictly_inside = false;
        for row in &probes {
            let features = FeatureVector::from(row);
            let p = model.churn_probability(&features).unwrap();

            let scaled = feature_matrix(&[model.scaler().transform(&features)]).unwrap();
            let trees = model.classifier().trees();
            let mean = trees
                .iter()
                .map(|tree| *tree.predict_proba(&scaled).unwrap().get((0, 1)))
                .sum::<f64>()
                / trees.len() as f64;

            assert!((p - mean).abs() < 1e-12);
            strictly_inside |= p > 0.0 && p < 1.0;
        }
        assert!(strictly_inside);
    }
}
