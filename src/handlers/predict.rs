//! Prediction handler

use axum::{extract::State, Json};

use crate::extract::AppJson;
use crate::features::MarketSnapshot;
use crate::model::PredictionResult;
use crate::{AppResult, AppState};

/// Classify one market snapshot
pub async fn predict(
    State(state): State<AppState>,
    AppJson(snapshot): AppJson<MarketSnapshot>,
) -> AppResult<Json<PredictionResult>> {
    let features = snapshot.to_feature_vector();
    let result = state.model.predict(&features)?;

    tracing::debug!(
        features = %features.to_log_entry(),
        probability = result.probability,
        is_anomaly = result.is_anomaly,
        "Prediction served"
    );

    Ok(Json(result))
}
