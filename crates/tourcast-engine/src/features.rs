//! Feature preparation: encoding, ordering, null-filling and scaling.

use serde::Serialize;
use tourcast_core::{Artifact, FeatureVector, PredictError, PredictionRecord};
use tracing::warn;

use crate::encoder::LabelEncoder;
use crate::scaler::StandardScaler;

/// Where the pipeline's country encoder came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderSource {
    /// Loaded from the training artifact.
    Fitted,
    /// Fitted at startup on the built-in reference list (degraded mode).
    Fallback,
    /// No usable encoder.
    Missing,
}

/// Places the raw record values in training column order.
pub fn assemble(record: &PredictionRecord, country_code: usize, unemployment: f64) -> FeatureVector {
    FeatureVector::new([
        country_code as f64,
        record.year() as f64,
        record.tourism_receipts(),
        record.tourism_exports(),
        record.tourism_expenditures(),
        record.gdp(),
        record.inflation(),
        unemployment,
    ])
}

/// Turns a validated record into a scaled [`FeatureVector`].
pub struct FeaturePreparer<'a> {
    encoder: &'a LabelEncoder,
    source: EncoderSource,
    scaler: &'a StandardScaler,
}

impl<'a> FeaturePreparer<'a> {
    pub fn new(encoder: &'a LabelEncoder, source: EncoderSource, scaler: &'a StandardScaler) -> Self {
        Self { encoder, source, scaler }
    }

    pub fn prepare(&self, record: &PredictionRecord) -> Result<FeatureVector, PredictError> {
        let unemployment = record.unemployment().unwrap_or(0.0);
        let country_code = self.encode(record.country())?;
        let raw = assemble(record, country_code, unemployment);
        self.scaler.transform(&raw)
    }

    fn encode(&self, country: &str) -> Result<usize, PredictError> {
        match self.source {
            EncoderSource::Missing => {
                return Err(PredictError::configuration(
                    Artifact::Encoder,
                    "no fitted country classes; provide label_encoder_country.json",
                ))
            }
            EncoderSource::Fallback => {
                warn!("Encoding '{}' with the reference-list fallback encoder", country);
            }
            EncoderSource::Fitted => {}
        }
        self.encoder.transform(country)
    }
}
