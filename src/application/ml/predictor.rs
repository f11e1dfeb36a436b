use crate::domain::customer::CustomerRecord;
use crate::domain::errors::PredictionError;
use crate::domain::ml::PredictionResult;
use uuid::Uuid;

/// Availability of the model behind a predictor, as reported by health checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelStatus {
    /// No load has been attempted.
    NotLoaded,
    /// An artifact file was absent at load time.
    Missing(String),
    /// Artifacts were present but unreadable, unparsable or mismatched.
    Corrupt(String),
    Available { run_id: Uuid },
}

impl ModelStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, ModelStatus::Available { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelStatus::NotLoaded => "not_loaded",
            ModelStatus::Missing(_) => "missing",
            ModelStatus::Corrupt(_) => "corrupt",
            ModelStatus::Available { .. } => "available",
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            ModelStatus::NotLoaded => None,
            ModelStatus::Missing(d) | ModelStatus::Corrupt(d) => Some(d.clone()),
            ModelStatus::Available { run_id } => Some(format!("run {}", run_id)),
        }
    }
}

/// Interface for churn scoring models
pub trait ChurnPredictor: Send + Sync {
    /// Score one customer. Fails with `ModelUnavailable` instead of guessing
    /// when no model is loaded.
    fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult, PredictionError>;

    /// Read-only availability query, independent of `predict`.
    fn status(&self) -> ModelStatus;

    fn is_available(&self) -> bool {
        self.status().is_available()
    }

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(ModelStatus::NotLoaded.label(), "not_loaded");
        assert!(!ModelStatus::Missing("x".into()).is_available());
        assert_eq!(
            ModelStatus::Corrupt("bad json".into()).detail().as_deref(),
            Some("bad json")
        );
        assert!(
            ModelStatus::Available {
                run_id: Uuid::nil()
            }
            .is_available()
        );
    }
}
