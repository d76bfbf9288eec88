//! Model artifact loading
//!
//! The trained classifier is exported as a JSON document tagged by `kind`.
//! Loading validates the document completely, so a [`Model`] that exists is
//! always safe to score with.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::inference::{Classifier, ModelKind};
use super::isolation_forest::{IsolationForest, IsolationTree, LEAF};
use super::logistic::{LogisticRegression, StandardScaler};
use super::Model;
use crate::features::layout::{validate_feature_names, validate_layout_hash};
use crate::features::{LayoutMismatchError, FEATURE_COUNT};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("model file not found: {0}")]
    NotFound(String),

    #[error("failed to read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model file is not a valid artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("invalid model: {0}")]
    Invalid(String),
}

// ============================================================================
// ON-DISK FORMAT
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactFile {
    LogisticRegression(LogisticArtifact),
    IsolationForest(ForestArtifact),
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticArtifact {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub layout_hash: Option<u32>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<ScalerArtifact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForestArtifact {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub layout_hash: Option<u32>,
    pub max_samples: u64,
    pub trees: Vec<TreeArtifact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeArtifact {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub n_node_samples: Vec<u64>,
}

// ============================================================================
// METADATA
// ============================================================================

/// Where the loaded model came from
#[derive(Debug, Clone)]
pub struct ModelMetadata {
    pub kind: ModelKind,
    pub path: String,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// LOADING
// ============================================================================

/// Load and validate a model artifact from disk
pub fn load_artifact(path: impl AsRef<Path>) -> Result<Model, ArtifactError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    tracing::info!("Loading model artifact from: {}", path_str);

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ArtifactError::NotFound(path_str.clone()),
        _ => ArtifactError::Io {
            path: path_str.clone(),
            source: e,
        },
    })?;

    let classifier = classifier_from_bytes(&bytes)?;
    let metadata = ModelMetadata {
        kind: classifier.kind(),
        path: path_str,
        sha256: hex::encode(Sha256::digest(&bytes)),
        loaded_at: Utc::now(),
    };

    tracing::info!(
        kind = ?metadata.kind,
        sha256 = %metadata.sha256,
        "Model artifact loaded successfully"
    );

    Ok(Model::new(classifier, metadata))
}

/// Parse and validate artifact bytes into a classifier
pub fn classifier_from_bytes(bytes: &[u8]) -> Result<Box<dyn Classifier>, ArtifactError> {
    let artifact: ArtifactFile = serde_json::from_slice(bytes)?;
    artifact.into_classifier()
}

impl ArtifactFile {
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ArtifactError> {
        match self {
            ArtifactFile::LogisticRegression(a) => Ok(Box::new(a.build()?)),
            ArtifactFile::IsolationForest(a) => Ok(Box::new(a.build()?)),
        }
    }
}

fn check_layout(names: &[String], hash: Option<u32>) -> Result<(), ArtifactError> {
    validate_feature_names(names)?;
    if let Some(hash) = hash {
        validate_layout_hash(hash)?;
    }
    Ok(())
}

/// Fixed-size, all-finite copy of a per-feature vector
fn per_feature(name: &str, values: &[f64]) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
        ArtifactError::Invalid(format!(
            "{} has {} values, expected {}",
            name,
            values.len(),
            FEATURE_COUNT
        ))
    })?;

    if let Some(i) = array.iter().position(|v| !v.is_finite()) {
        return Err(ArtifactError::Invalid(format!("{}[{}] is not finite", name, i)));
    }

    Ok(array)
}

impl LogisticArtifact {
    pub fn build(self) -> Result<LogisticRegression, ArtifactError> {
        check_layout(&self.feature_names, self.layout_hash)?;

        let coefficients = per_feature("coefficients", &self.coefficients)?;
        if !self.intercept.is_finite() {
            return Err(ArtifactError::Invalid("intercept is not finite".to_string()));
        }

        let scaler = match self.scaler {
            Some(s) => Some(StandardScaler::new(
                per_feature("scaler.mean", &s.mean)?,
                per_feature("scaler.scale", &s.scale)?,
            )),
            None => None,
        };

        Ok(LogisticRegression::new(coefficients, self.intercept, scaler))
    }
}

impl ForestArtifact {
    pub fn build(self) -> Result<IsolationForest, ArtifactError> {
        check_layout(&self.feature_names, self.layout_hash)?;

        // c(1) == 0, so a one-sample forest has no score normaliser
        if self.max_samples < 2 {
            return Err(ArtifactError::Invalid("max_samples must be at least 2".to_string()));
        }
        if self.trees.is_empty() {
            return Err(ArtifactError::Invalid("forest has no trees".to_string()));
        }

        let trees = self
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, tree)| {
                tree.build()
                    .map_err(|msg| ArtifactError::Invalid(format!("tree {}: {}", i, msg)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(IsolationForest::new(trees, self.max_samples))
    }
}

impl TreeArtifact {
    fn build(self) -> Result<IsolationTree, String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.n_node_samples.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err("node arrays have different lengths".to_string());
        }

        let mut feature = Vec::with_capacity(n);
        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];

            if left == LEAF {
                if right != LEAF {
                    return Err(format!("node {} has only a right child", node));
                }
                // Leaves carry no split; the training library stores -2 here
                feature.push(0);
                continue;
            }

            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {} has out-of-order child {}", node, child));
                }
            }

            let f = self.feature[node];
            if f < 0 || f >= FEATURE_COUNT as i64 {
                return Err(format!("node {} splits on unknown feature {}", node, f));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {} has a non-finite threshold", node));
            }
            feature.push(f as usize);
        }

        Ok(IsolationTree::from_parts(
            self.children_left,
            self.children_right,
            feature,
            self.threshold,
            self.n_node_samples,
        ))
    }
}
