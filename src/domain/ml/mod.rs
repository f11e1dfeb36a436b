// Feature schema shared by training and serving
pub mod feature_registry;

// Provenance stored with each artifact
pub mod metadata;

// Response contract
pub mod prediction;

// Standardisation fitted at training time
pub mod scaler;

pub use feature_registry::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
pub use metadata::ModelMetadata;
pub use prediction::{DECISION_THRESHOLD, PredictionResult};
pub use scaler::FeatureScaler;
