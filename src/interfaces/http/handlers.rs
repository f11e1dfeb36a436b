use super::{ApiError, AppState};
use crate::domain::customer::CustomerRecord;
use crate::domain::errors::PredictionError;
use crate::domain::ml::PredictionResult;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub service: String,
    pub version: String,
}

/// Service info endpoint
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to the Customer Churn Prediction API".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub model_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Health check endpoint. Always 200; model availability is in the body.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = state.predictor.status();
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: status.is_available(),
        model_state: status.label().to_string(),
        detail: status.detail(),
    })
}

/// Score one customer
pub async fn predict_churn(
    State(state): State<AppState>,
    payload: Result<Json<CustomerRecord>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let started = Instant::now();

    let result = match payload {
        Ok(Json(record)) => state.predictor.predict(&record),
        Err(rejection) => Err(ApiError::from(rejection).0),
    };

    let outcome = match &result {
        Ok(r) if r.prediction => "churn",
        Ok(_) => "retain",
        Err(PredictionError::ModelUnavailable { .. }) => "unavailable",
        Err(PredictionError::InvalidInput { .. }) => "invalid",
        Err(PredictionError::InferenceFailed { .. }) => "error",
    };
    let elapsed = started.elapsed().as_secs_f64();
    state.metrics.record_prediction(outcome, elapsed);
    debug!(outcome, elapsed_ms = elapsed * 1000.0, "Prediction handled");

    Ok(Json(result?))
}

/// Prometheus metrics endpoint
///
/// Returns metrics in Prometheus text exposition format
pub async fn metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics.gather_text() {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
