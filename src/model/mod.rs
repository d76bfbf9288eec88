//! Model Module - classifier artifact and inference
//!
//! The artifact is loaded once at startup and shared read-only by every
//! request handler.

pub mod artifact;
pub mod inference;
pub mod isolation_forest;
pub mod logistic;

// Re-export common types
pub use artifact::{load_artifact, ArtifactError, ModelMetadata};
pub use inference::{Classifier, ModelKind, PredictionResult, ScoringError, ANOMALY_THRESHOLD};

use crate::features::FeatureVector;

/// A loaded classifier plus where it came from
pub struct Model {
    classifier: Box<dyn Classifier>,
    metadata: ModelMetadata,
}

impl Model {
    pub fn new(classifier: Box<dyn Classifier>, metadata: ModelMetadata) -> Self {
        Self {
            classifier,
            metadata,
        }
    }

    /// Score one feature vector and apply the anomaly threshold
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, ScoringError> {
        inference::classify(self.classifier.as_ref(), features)
    }

    pub fn kind(&self) -> ModelKind {
        self.classifier.kind()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("kind", &self.kind())
            .field("metadata", &self.metadata)
            .finish()
    }
}
