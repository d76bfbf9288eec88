//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};

#[derive(Serialize)]
pub struct RootResponse {
    message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    timestamp: i64,
}

/// Static liveness message at `/`
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} Model API is running.", state.model.kind().display_name()),
    })
}

pub async fn check(State(_state): State<AppState>) -> Json<HealthResponse> {
    // The server never starts without a model, so reaching here means it is loaded
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: true,
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}
