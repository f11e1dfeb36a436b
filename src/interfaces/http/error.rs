use crate::domain::errors::PredictionError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Error returned by HTTP handlers, rendered as a structured JSON body
#[derive(Debug)]
pub struct ApiError(pub PredictionError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            PredictionError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            PredictionError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PredictionError::InferenceFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match &self.0 {
            PredictionError::ModelUnavailable { .. } => "MODEL_UNAVAILABLE",
            PredictionError::InvalidInput { .. } => "INVALID_INPUT",
            PredictionError::InferenceFailed { .. } => "INFERENCE_FAILED",
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(PredictionError::InvalidInput {
            reason: rejection.body_text(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code = error_code,
                status_code = status.as_u16(),
                message = %message,
                "Request error"
            );
        } else {
            tracing::warn!(
                error_code = error_code,
                status_code = status.as_u16(),
                "Rejected request"
            );
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let unavailable = ApiError::from(PredictionError::ModelUnavailable {
            reason: "model not loaded".into(),
        });
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(unavailable.status_code().is_server_error());

        let invalid = ApiError::from(PredictionError::InvalidInput {
            reason: "age".into(),
        });
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::from(PredictionError::InferenceFailed {
            reason: "bad shape".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
