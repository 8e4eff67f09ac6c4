//! Regression models and their inference.

use serde::{Deserialize, Serialize};
use tourcast_core::{Artifact, PredictError, FEATURE_COUNT};

use crate::ArtifactError;

/// Sentinel child index marking a leaf node.
pub const LEAF: i64 = -1;

/// A fitted model that maps one scaled feature row to one scalar.
pub trait Regressor: Send + Sync {
    /// Number of input features the model was fitted on.
    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> Result<f64, PredictError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Regression Tree
// ─────────────────────────────────────────────────────────────────────────────

/// A single regression tree in flat parallel-array layout.
///
/// Internal node `i` routes to `children_left[i]` when
/// `x[feature[i]] <= threshold[i]`, otherwise to `children_right[i]`.
/// Inputs are rounded to `f32` before the comparison, the precision the
/// thresholds were fitted at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    /// Checks the tree is well formed for `n_features` inputs.
    ///
    /// Children always have a larger index than their parent, so a checked
    /// tree cannot cycle.
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.value.len();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        let lengths = [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(format!("node arrays disagree in length (expected {})", n));
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {} has exactly one child", i));
                }
                if !self.value[i].is_finite() {
                    return Err(format!("leaf {} has a non-finite value", i));
                }
                continue;
            }
            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {} has out-of-order child {}", i, child));
                }
            }
            let feature = self.feature[i];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on feature {} of {}", i, feature, n_features));
            }
            if self.threshold[i].is_nan() {
                return Err(format!("node {} has a NaN threshold", i));
            }
        }
        Ok(())
    }

    /// Walks from the root to a leaf and returns its value.
    ///
    /// Trees that skipped [`validate`](Self::validate) fail with an inference
    /// error instead of panicking or looping.
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        let malformed = |node: usize| PredictError::inference(format!("malformed tree at node {}", node));

        let mut node = 0usize;
        for _ in 0..self.value.len() {
            let left = *self.children_left.get(node).ok_or_else(|| malformed(node))?;
            if left == LEAF {
                return self.value.get(node).copied().ok_or_else(|| malformed(node));
            }
            let feature = *self.feature.get(node).ok_or_else(|| malformed(node))?;
            let x = usize::try_from(feature)
                .ok()
                .and_then(|idx| features.get(idx))
                .ok_or_else(|| PredictError::inference(format!("feature {} missing", feature)))?;
            let threshold = *self.threshold.get(node).ok_or_else(|| malformed(node))?;
            let next = if f64::from(*x as f32) <= threshold {
                left
            } else {
                *self.children_right.get(node).ok_or_else(|| malformed(node))?
            };
            node = usize::try_from(next).map_err(|_| malformed(node))?;
        }
        Err(PredictError::inference("tree traversal did not reach a leaf"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Models
// ─────────────────────────────────────────────────────────────────────────────

/// Averaging ensemble of regression trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    #[serde(default = "default_n_features")]
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
}

impl Regressor for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_width(self.n_features, features)?;
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict(features)?;
        }
        Ok(sum / self.trees.len() as f64)
    }
}

/// Ordinary linear regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_width(self.coefficients.len(), features)?;
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum();
        Ok(dot + self.intercept)
    }
}

fn default_n_features() -> usize {
    FEATURE_COUNT
}

fn check_width(expected: usize, features: &[f64]) -> Result<(), PredictError> {
    if features.len() != expected {
        return Err(PredictError::inference(format!(
            "model expects {} features, got {}",
            expected,
            features.len()
        )));
    }
    Ok(())
}

/// Serialized model artifact, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelFile {
    RandomForest(RandomForest),
    Linear(LinearModel),
}

impl ModelFile {
    /// Validates the model structure and returns it as a boxed [`Regressor`].
    pub fn into_regressor(self) -> Result<Box<dyn Regressor>, ArtifactError> {
        match self {
            ModelFile::RandomForest(forest) => {
                if forest.n_features != FEATURE_COUNT {
                    return Err(invalid(format!(
                        "forest fitted on {} features, expected {}",
                        forest.n_features, FEATURE_COUNT
                    )));
                }
                if forest.trees.is_empty() {
                    return Err(invalid("forest has no trees".to_string()));
                }
                for (idx, tree) in forest.trees.iter().enumerate() {
                    tree.validate(forest.n_features)
                        .map_err(|reason| invalid(format!("tree {}: {}", idx, reason)))?;
                }
                Ok(Box::new(forest))
            }
            ModelFile::Linear(linear) => {
                if linear.coefficients.len() != FEATURE_COUNT {
                    return Err(invalid(format!(
                        "linear model has {} coefficients, expected {}",
                        linear.coefficients.len(),
                        FEATURE_COUNT
                    )));
                }
                if linear.coefficients.iter().any(|c| !c.is_finite()) || !linear.intercept.is_finite() {
                    return Err(invalid("linear model has non-finite parameters".to_string()));
                }
                Ok(Box::new(linear))
            }
        }
    }
}

fn invalid(reason: String) -> ArtifactError {
    ArtifactError::invalid(Artifact::Model, reason)
}
