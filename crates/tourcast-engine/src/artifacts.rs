//! Loading the fitted artifacts produced by the training pipeline.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tourcast_config::ArtifactPaths;
use tourcast_core::Artifact;
use tracing::{info, warn};

use crate::encoder::{EncoderFile, LabelEncoder};
use crate::model::{ModelFile, Regressor};
use crate::scaler::{ScalerFile, StandardScaler};

/// Errors from reading or checking an artifact file.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {artifact}: {reason}")]
    Invalid { artifact: Artifact, reason: String },
}

impl ArtifactError {
    pub fn invalid(artifact: Artifact, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid { artifact, reason: reason.into() }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_model(path: &Path) -> Result<Box<dyn Regressor>, ArtifactError> {
    read_json::<ModelFile>(path)?.into_regressor()
}

pub fn load_scaler(path: &Path) -> Result<StandardScaler, ArtifactError> {
    StandardScaler::try_from(read_json::<ScalerFile>(path)?)
}

pub fn load_encoder(path: &Path) -> Result<LabelEncoder, ArtifactError> {
    Ok(LabelEncoder::from(read_json::<EncoderFile>(path)?))
}

/// The model, scaler and encoder, immutable once constructed.
///
/// Missing pieces are represented by placeholders (no model, unfitted
/// scaler, unfitted encoder) so the service can still start.
#[derive(Default)]
pub struct Artifacts {
    pub model: Option<Box<dyn Regressor>>,
    pub scaler: StandardScaler,
    pub encoder: LabelEncoder,
}

impl fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifacts")
            .field("model", &self.model.as_ref().map(|m| m.n_features()))
            .field("scaler", &self.scaler)
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl Artifacts {
    pub fn new(model: Option<Box<dyn Regressor>>, scaler: StandardScaler, encoder: LabelEncoder) -> Self {
        Self { model, scaler, encoder }
    }

    /// Loads all three artifacts. Failures are logged and leave a placeholder.
    pub fn load(paths: &ArtifactPaths) -> Self {
        let model = match load_model(&paths.model_path) {
            Ok(model) => {
                info!("Successfully loaded model from {}", paths.model_path.display());
                Some(model)
            }
            Err(e) => {
                warn!("Model unavailable, predictions will fail: {}", e);
                None
            }
        };

        let scaler = match load_scaler(&paths.scaler_path) {
            Ok(scaler) => {
                info!("Successfully loaded scaler from {}", paths.scaler_path.display());
                scaler
            }
            Err(e) => {
                warn!("Scaler unavailable, using an unfitted placeholder: {}", e);
                StandardScaler::new()
            }
        };

        let encoder = match load_encoder(&paths.encoder_path) {
            Ok(encoder) if !encoder.is_fitted() => {
                warn!(
                    "Label encoder at {} has no classes and is unusable",
                    paths.encoder_path.display()
                );
                encoder
            }
            Ok(encoder) => {
                info!(
                    "Successfully loaded label encoder from {} ({} countries)",
                    paths.encoder_path.display(),
                    encoder.classes().len()
                );
                encoder
            }
            Err(e) => {
                warn!("Label encoder unavailable, using an unfitted placeholder: {}", e);
                LabelEncoder::new()
            }
        };

        Self { model, scaler, encoder }
    }
}
