use super::feature_registry::{FEATURE_COUNT, FeatureVector};
use crate::domain::errors::TrainingError;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Zero-mean / unit-variance standardisation, fitted once per training run.
///
/// Uses the population standard deviation. Columns with (near) zero spread
/// keep a scale of 1.0 so they are only centred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    means: [f64; FEATURE_COUNT],
    scales: [f64; FEATURE_COUNT],
}

impl FeatureScaler {
    pub fn fit(rows: &[FeatureVector]) -> Result<Self, TrainingError> {
        if rows.is_empty() {
            return Err(TrainingError::InvalidDataset {
                reason: "cannot fit scaler on an empty partition".to_string(),
            });
        }

        let mut means = [0.0; FEATURE_COUNT];
        let mut scales = [1.0; FEATURE_COUNT];

        for col in 0..FEATURE_COUNT {
            let column: Vec<f64> = rows.iter().map(|r| r.values()[col]).collect();
            let mean = column.iter().mean();
            let std_dev = column.iter().population_std_dev();

            if !mean.is_finite() || !std_dev.is_finite() {
                return Err(TrainingError::InvalidDataset {
                    reason: format!("column {} contains non-finite values", col),
                });
            }

            means[col] = mean;
            if std_dev > 10.0 * f64::EPSILON * mean.abs().max(1.0) {
                scales[col] = std_dev;
            }
        }

        Ok(Self { means, scales })
    }

    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = *features.values();
        for (i, v) in out.iter_mut().enumerate() {
            *v = (*v - self.means[i]) / self.scales[i];
        }
        FeatureVector::new(out)
    }

    pub fn transform_all(&self, rows: &[FeatureVector]) -> Vec<FeatureVector> {
        rows.iter().map(|r| self.transform(r)).collect()
    }

    pub fn means(&self) -> &[f64; FEATURE_COUNT] {
        &self.means
    }

    pub fn scales(&self) -> &[f64; FEATURE_COUNT] {
        &self.scales
    }
}
