// Training, evaluation and inference
pub mod ml;
