//! Inference - classifier abstraction and anomaly thresholding
//!
//! Every artifact kind implements [`Classifier`]; the prediction rule on top
//! of it is shared.

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;

/// Probability at or above which a snapshot is flagged as anomalous
pub const ANOMALY_THRESHOLD: f64 = 0.5;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Supported artifact kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    IsolationForest,
}

impl ModelKind {
    /// Human readable name, used in the root message
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::LogisticRegression => "Logistic Regression",
            ModelKind::IsolationForest => "Isolation Forest",
        }
    }
}

/// Prediction output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub is_anomaly: bool,
    pub probability: f64,
}

impl PredictionResult {
    /// Apply the anomaly threshold to a probability
    pub fn from_probability(probability: f64) -> Self {
        Self {
            is_anomaly: probability >= ANOMALY_THRESHOLD,
            probability,
        }
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("model produced a non-finite score ({0})")]
    NonFinite(f64),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for loaded model artifacts
pub trait Classifier: Send + Sync {
    /// Positive-class (anomaly) probability for one feature vector
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ScoringError>;

    fn kind(&self) -> ModelKind;
}

/// Score a vector and threshold the result
///
/// Non-finite scores are rejected; finite scores are clamped into `[0, 1]`.
pub fn classify(
    classifier: &dyn Classifier,
    features: &FeatureVector,
) -> Result<PredictionResult, ScoringError> {
    let raw = classifier.predict_proba(features)?;
    if !raw.is_finite() {
        return Err(ScoringError::NonFinite(raw));
    }

    Ok(PredictionResult::from_probability(raw.clamp(0.0, 1.0)))
}
