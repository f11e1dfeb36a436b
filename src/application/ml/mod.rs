pub mod evaluation;
pub mod forest;
pub mod model;
pub mod predictor;
pub mod smartcore_predictor;
pub mod synthetic_data;
pub mod trainer;

pub use forest::{ChurnForest, ForestParameters};
pub use model::ChurnModel;
pub use predictor::{ChurnPredictor, ModelStatus};
pub use smartcore_predictor::SmartCorePredictor;
pub use trainer::{ChurnTrainer, TrainedModel, TrainingConfig};
