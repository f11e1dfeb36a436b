pub mod artifact_store;

pub use artifact_store::{ArtifactStore, CLASSIFIER_FILE, SCALER_FILE};
