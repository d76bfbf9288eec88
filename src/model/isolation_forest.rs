//! Isolation Forest classifier
//!
//! Trees are stored in the flat array encoding used by the training library:
//! node 0 is the root, `children_left[i] == -1` marks a leaf, and samples with
//! `x[feature[i]] <= threshold[i]` descend left.

use super::inference::{Classifier, ModelKind, ScoringError};
use crate::features::FeatureVector;

/// Euler-Mascheroni constant
const EULER_GAMMA: f64 = 0.577_215_664_9;

/// Leaf marker in `children_left` / `children_right`
pub const LEAF: i64 = -1;

/// Average path length of an unsuccessful BST search over `n` samples
pub fn average_path_length(n: u64) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// One validated isolation tree
#[derive(Debug, Clone)]
pub struct IsolationTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<usize>,
    threshold: Vec<f64>,
    n_node_samples: Vec<u64>,
}

impl IsolationTree {
    /// Build a tree from arrays already checked by the artifact loader
    pub(crate) fn from_parts(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<usize>,
        threshold: Vec<f64>,
        n_node_samples: Vec<u64>,
    ) -> Self {
        Self {
            children_left,
            children_right,
            feature,
            threshold,
            n_node_samples,
        }
    }

    /// Depth of the leaf reached plus the expected remaining path in it
    ///
    /// Children always have a larger index than their parent, so the walk
    /// terminates within one step per node.
    pub fn path_length(&self, features: &FeatureVector) -> f64 {
        let values = features.as_array();
        let mut node = 0usize;
        let mut depth = 0u32;

        while self.children_left[node] != LEAF {
            let goes_left = values[self.feature[node]] <= self.threshold[node];
            let next = if goes_left {
                self.children_left[node]
            } else {
                self.children_right[node]
            };
            node = next as usize;
            depth += 1;
        }

        f64::from(depth) + average_path_length(self.n_node_samples[node])
    }
}

#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    max_samples: u64,
}

impl IsolationForest {
    pub fn new(trees: Vec<IsolationTree>, max_samples: u64) -> Self {
        Self { trees, max_samples }
    }

    /// Mean path length over all trees
    pub fn mean_path_length(&self, features: &FeatureVector) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.path_length(features)).sum();
        total / self.trees.len() as f64
    }
}

impl Classifier for IsolationForest {
    /// Isolation score `2^(-E[h(x)] / c(max_samples))`
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
        let normaliser = average_path_length(self.max_samples);
        if normaliser == 0.0 {
            // 0 / 0: a one-sample forest has no defined score
            return Err(ScoringError::NonFinite(f64::NAN));
        }

        let score = 2f64.powf(-self.mean_path_length(features) / normaliser);
        if !score.is_finite() {
            return Err(ScoringError::NonFinite(score));
        }
        Ok(score)
    }

    fn kind(&self) -> ModelKind {
        ModelKind::IsolationForest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;

    /// Root splits on VIX at 30; the high side isolates immediately
    fn vix_tree() -> IsolationTree {
        IsolationTree::from_parts(
            vec![1, 3, LEAF, LEAF, LEAF],
            vec![2, 4, LEAF, LEAF, LEAF],
            vec![0, 1, 0, 0, 0],
            vec![30.0, 95.0, 0.0, 0.0, 0.0],
            vec![256, 250, 6, 120, 130],
        )
    }

    fn snapshot(vix: f64, dxy: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = vix;
        values[1] = dxy;
        FeatureVector::from_values(values)
    }

    #[test]
    fn test_average_path_length() {
        assert_eq!(average_path_length(0), 0.0);
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        // c(256) is about 10.24
        let c = average_path_length(256);
        assert!((c - 10.24).abs() < 0.01, "c(256) = {}", c);
    }

    #[test]
    fn test_path_length_follows_splits() {
        let tree = vix_tree();

        // VIX 45 > 30 → node 2 at depth 1
        let short = tree.path_length(&snapshot(45.0, 95.0));
        assert!((short - (1.0 + average_path_length(6))).abs() < 1e-12);

        // VIX 15 → node 1, DXY 95 <= 95 → node 3 at depth 2
        let long = tree.path_length(&snapshot(15.0, 95.0));
        assert!((long - (2.0 + average_path_length(120))).abs() < 1e-12);
    }

    #[test]
    fn test_isolated_points_score_higher() {
        let forest = IsolationForest::new(vec![vix_tree(), vix_tree()], 256);

        let outlier = forest.predict_proba(&snapshot(45.0, 95.0)).unwrap();
        let inlier = forest.predict_proba(&snapshot(15.0, 95.0)).unwrap();

        assert!(outlier > inlier);
        assert!(outlier > 0.5);
        assert!(inlier < 0.5);
        assert!(outlier <= 1.0 && inlier > 0.0);
    }

    #[test]
    fn test_one_sample_forest_is_a_scoring_error() {
        let forest = IsolationForest::new(vec![vix_tree()], 1);

        assert!(matches!(
            forest.predict_proba(&snapshot(0.0, 0.0)),
            Err(ScoringError::NonFinite(_))
        ));
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = IsolationTree::from_parts(vec![LEAF], vec![LEAF], vec![0], vec![0.0], vec![1]);
        let forest = IsolationForest::new(vec![tree], 256);

        // Depth 0 and c(1) = 0 → score 2^0
        assert_eq!(forest.predict_proba(&snapshot(0.0, 0.0)).unwrap(), 1.0);
    }
}
