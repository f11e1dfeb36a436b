//! HTTP surface of the prediction service.
//!
//! Thin axum wiring: the predictor handle and metrics are built once at
//! startup and injected as shared state; no handler reloads or mutates them.

pub mod error;
pub mod handlers;
pub mod routes;

use crate::application::ml::ChurnPredictor;
use crate::infrastructure::observability::Metrics;
use std::sync::Arc;

pub use error::ApiError;
pub use routes::build_router;

/// Shared, read-only state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn ChurnPredictor>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(predictor: Arc<dyn ChurnPredictor>, metrics: Metrics) -> Self {
        metrics.set_model_loaded(predictor.is_available());
        Self { predictor, metrics }
    }
}
