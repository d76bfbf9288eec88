//! Model metadata handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::features::LayoutInfo;
use crate::model::{ModelKind, ANOMALY_THRESHOLD};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub kind: ModelKind,
    pub path: String,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
    pub feature_layout: LayoutInfo,
    pub threshold: f64,
}

/// Describe the loaded artifact
pub async fn info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let metadata = state.model.metadata();

    Json(ModelInfoResponse {
        kind: metadata.kind,
        path: metadata.path.clone(),
        sha256: metadata.sha256.clone(),
        loaded_at: metadata.loaded_at,
        feature_layout: LayoutInfo::current(),
        threshold: ANOMALY_THRESHOLD,
    })
}
