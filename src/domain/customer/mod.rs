// Customer records as received by the predictor and as stored in training datasets
pub mod types;

pub use types::{CustomerRecord, LabeledRecord};
