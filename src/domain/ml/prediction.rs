use serde::{Deserialize, Serialize};

/// Probability above which a customer is classified as churning.
pub const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub customer_id: String,
    pub churn_probability: f64,
    pub prediction: bool,
    pub confidence: f64,
}

impl PredictionResult {
    /// Derives the decision and confidence from a positive-class probability
    /// already checked to lie in [0, 1].
    pub fn from_probability(customer_id: impl Into<String>, p: f64) -> Self {
        Self {
            customer_id: customer_id.into(),
            churn_probability: p,
            prediction: p > DECISION_THRESHOLD,
            confidence: p.max(1.0 - p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let r = PredictionResult::from_probability("a", 0.5);
        assert!(!r.prediction);
        assert_eq!(r.confidence, 0.5);

        let r = PredictionResult::from_probability("a", 0.51);
        assert!(r.prediction);
    }

    #[test]
    fn test_confidence_identity() {
        for i in 0..=100 {
            let p = i as f64 / 100.0;
            let r = PredictionResult::from_probability("c", p);
            assert_eq!(r.confidence, p.max(1.0 - p));
            assert!((0.5..=1.0).contains(&r.confidence));
            assert_eq!(r.prediction, p > 0.5);
        }
    }

    #[test]
    fn test_customer_id_is_echoed() {
        let r = PredictionResult::from_probability("CUST-42", 0.2);
        assert_eq!(r.customer_id, "CUST-42");
        assert!(!r.prediction);
        assert!((r.confidence - 0.8).abs() < 1e-12);
    }
}
