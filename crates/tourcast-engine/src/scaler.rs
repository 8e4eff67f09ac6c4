//! Per-feature standard scaler.

use serde::{Deserialize, Serialize};
use tourcast_core::{Artifact, FeatureVector, PredictError, FEATURE_COUNT};

use crate::ArtifactError;

/// On-disk form of a fitted scaler.
///
/// `scale` is the per-feature standard deviation. When it is absent it is
/// derived from `var`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerFile {
    pub mean: Vec<f64>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
    #[serde(default)]
    pub var: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScalerParams {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

/// Standardizes a feature vector as `(x - mean) / scale`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardScaler {
    params: Option<ScalerParams>,
}

impl StandardScaler {
    /// Creates an unfitted scaler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fitted scaler. A zero scale entry (constant feature) is treated as `1.0`.
    pub fn fitted(mean: &[f64], scale: &[f64]) -> Result<Self, ArtifactError> {
        let mean = to_array("mean", mean)?;
        let mut scale = to_array("scale", scale)?;
        for s in scale.iter_mut() {
            if *s < 0.0 {
                return Err(ArtifactError::invalid(Artifact::Scaler, "scale entries must be non-negative"));
            }
            if *s == 0.0 {
                *s = 1.0;
            }
        }
        Ok(Self { params: Some(ScalerParams { mean, scale }) })
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    pub fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, PredictError> {
        let params = self.params.as_ref().ok_or_else(|| {
            PredictError::configuration(
                Artifact::Scaler,
                "scaler was never fitted; refusing to pass unscaled features to the model",
            )
        })?;

        let mut scaled = *features.values();
        for (i, x) in scaled.iter_mut().enumerate() {
            *x = (*x - params.mean[i]) / params.scale[i];
        }
        Ok(FeatureVector::new(scaled))
    }
}

impl TryFrom<ScalerFile> for StandardScaler {
    type Error = ArtifactError;

    fn try_from(file: ScalerFile) -> Result<Self, Self::Error> {
        let scale = match (file.scale, file.var) {
            (Some(scale), _) => scale,
            (None, Some(var)) => var.iter().map(|v| v.sqrt()).collect(),
            (None, None) => {
                return Err(ArtifactError::invalid(Artifact::Scaler, "neither scale nor var present"))
            }
        };
        Self::fitted(&file.mean, &scale)
    }
}

fn to_array(name: &str, values: &[f64]) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ArtifactError::invalid(
            Artifact::Scaler,
            format!("{} contains non-finite values", name),
        ));
    }
    values.try_into().map_err(|_| {
        ArtifactError::invalid(
            Artifact::Scaler,
            format!("{} has {} entries, expected {}", name, values.len(), FEATURE_COUNT),
        )
    })
}
