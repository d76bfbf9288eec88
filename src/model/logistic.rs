//! Logistic regression classifier
//!
//! Reproduces the positive-class column of a fitted binary logistic
//! regression, optionally preceded by the standard scaler it was trained
//! behind.

use ndarray::Array1;

use super::inference::{Classifier, ModelKind, ScoringError};
use crate::features::{FeatureVector, FEATURE_COUNT};

/// Per-feature standardisation: `(x - mean) / scale`
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Zero scales are replaced by 1, so constant training columns pass through centred
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        let scale = scale.map(|s| if s == 0.0 { 1.0 } else { s });
        Self {
            mean: Array1::from(mean.to_vec()),
            scale: Array1::from(scale.to_vec()),
        }
    }

    pub fn transform(&self, x: &Array1<f64>) -> Array1<f64> {
        (x - &self.mean) / &self.scale
    }
}

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coefficients: Array1<f64>,
    intercept: f64,
    scaler: Option<StandardScaler>,
}

impl LogisticRegression {
    pub fn new(
        coefficients: [f64; FEATURE_COUNT],
        intercept: f64,
        scaler: Option<StandardScaler>,
    ) -> Self {
        Self {
            coefficients: Array1::from(coefficients.to_vec()),
            intercept,
            scaler,
        }
    }

    /// Linear decision value before the sigmoid
    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        let x = features.to_array1();
        let x = match &self.scaler {
            Some(scaler) => scaler.transform(&x),
            None => x,
        };
        self.coefficients.dot(&x) + self.intercept
    }
}

/// Logistic function, split on sign so large magnitudes don't overflow
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticRegression {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
        let z = self.decision_function(features);
        if z.is_nan() {
            return Err(ScoringError::NonFinite(z));
        }
        Ok(sigmoid(z))
    }

    fn kind(&self) -> ModelKind {
        ModelKind::LogisticRegression
    }
}
