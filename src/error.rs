//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::model::ScoringError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    ValidationError(String),
    NotFound(String),

    // Scoring errors
    PredictionError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PredictionError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message sent back to the client in `detail`
    pub fn detail(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::PredictionError(msg) => format!("Error during prediction: {}", msg),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detail())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::ValidationError(msg) => {
                tracing::debug!("Rejected request: {}", msg);
            }
            AppError::PredictionError(msg) => {
                tracing::warn!("Prediction failed: {}", msg);
            }
            AppError::NotFound(_) => {}
        }

        let body = Json(json!({
            "detail": self.detail(),
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        AppError::PredictionError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::ValidationError("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PredictionError("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_detail_is_passed_through() {
        let err = AppError::ValidationError("missing field `VIX`".into());
        assert_eq!(err.detail(), "missing field `VIX`");
        assert_eq!(err.to_string(), "missing field `VIX`");
    }

    #[test]
    fn test_scoring_error_detail() {
        let err: AppError = ScoringError::NonFinite(f64::NAN).into();
        assert!(err.detail().starts_with("Error during prediction: "));
        assert!(err.detail().contains("non-finite"));
    }
}
