//! Prediction pipeline: validation, feature preparation and inference.

use serde::Serialize;
use tourcast_core::{parse_record, Artifact, PredictError, PredictionRecord};
use tracing::{debug, error, info};

use crate::artifacts::Artifacts;
use crate::encoder::{LabelEncoder, REFERENCE_COUNTRIES};
use crate::features::{EncoderSource, FeaturePreparer};

/// Options that change how missing artifacts are handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Fit the encoder on the reference country list when none was loaded.
    pub fallback_encoder: bool,
}

/// Which artifacts the pipeline has available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtifactStatus {
    pub model: bool,
    pub scaler: bool,
    pub encoder: EncoderSource,
}

impl ArtifactStatus {
    /// Whether every artifact came from training output.
    pub fn is_ready(&self) -> bool {
        self.model && self.scaler && self.encoder == EncoderSource::Fitted
    }
}

/// Maps validated records to predicted tourism arrivals.
///
/// Holds the artifacts read-only, so a single instance can be shared across
/// request handlers without locking.
#[derive(Debug)]
pub struct Pipeline {
    artifacts: Artifacts,
    encoder_source: EncoderSource,
}

impl Pipeline {
    pub fn new(mut artifacts: Artifacts, options: PipelineOptions) -> Self {
        let encoder_source = if artifacts.encoder.is_fitted() {
            EncoderSource::Fitted
        } else if options.fallback_encoder {
            error!(
                "DEGRADED MODE: no fitted label encoder, fitting on {} reference countries. \
                 Country codes may not match the model. Do not run this in production.",
                REFERENCE_COUNTRIES.len()
            );
            artifacts.encoder = LabelEncoder::fit(REFERENCE_COUNTRIES);
            EncoderSource::Fallback
        } else {
            EncoderSource::Missing
        };

        Self { artifacts, encoder_source }
    }

    pub fn status(&self) -> ArtifactStatus {
        ArtifactStatus {
            model: self.artifacts.model.is_some(),
            scaler: self.artifacts.scaler.is_fitted(),
            encoder: self.encoder_source,
        }
    }

    /// Scores a validated record.
    pub fn predict(&self, record: &PredictionRecord) -> Result<f64, PredictError> {
        let model = self.artifacts.model.as_deref().ok_or_else(|| {
            PredictError::configuration(Artifact::Model, "not loaded, cannot make predictions")
        })?;

        let preparer = FeaturePreparer::new(
            &self.artifacts.encoder,
            self.encoder_source,
            &self.artifacts.scaler,
        );
        let features = preparer.prepare(record)?;
        debug!(features = ?features.values(), "prepared features");

        let prediction = model.predict(features.as_slice())?;
        if !prediction.is_finite() {
            return Err(PredictError::inference(format!(
                "model produced a non-finite value ({})",
                prediction
            )));
        }

        info!(country = record.country(), year = record.year(), prediction, "prediction complete");
        Ok(prediction)
    }

    /// Validates a raw JSON body, then scores it.
    pub fn predict_json(&self, body: &[u8]) -> Result<f64, PredictError> {
        let record = parse_record(body)?;
        self.predict(&record)
    }
}
