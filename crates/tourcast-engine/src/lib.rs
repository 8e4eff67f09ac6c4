//! Artifact loading, feature preparation and inference for tourcast.
//!
//! A [`Pipeline`] owns the three fitted [`Artifacts`] and turns a validated
//! [`PredictionRecord`](tourcast_core::PredictionRecord) into one predicted
//! value:
//!
//! 1. model gate: fail with a configuration error when no model was loaded
//! 2. [`FeaturePreparer`]: fill missing unemployment, encode the country,
//!    order the features, scale them
//! 3. [`Regressor::predict`]: run the model on the scaled row

mod artifacts;
mod encoder;
mod features;
mod model;
mod pipeline;
mod scaler;

pub use artifacts::{load_encoder, load_model, load_scaler, ArtifactError, Artifacts};
pub use encoder::{EncoderFile, LabelEncoder, REFERENCE_COUNTRIES};
pub use features::{assemble, EncoderSource, FeaturePreparer};
pub use model::{LinearModel, ModelFile, RandomForest, RegressionTree, Regressor, LEAF};
pub use pipeline::{ArtifactStatus, Pipeline, PipelineOptions};
pub use scaler::{ScalerFile, StandardScaler};

use tourcast_config::ServiceConfig;

/// Loads artifacts from the configured paths and builds the pipeline.
pub fn pipeline_from_config(config: &ServiceConfig) -> Pipeline {
    let artifacts = Artifacts::load(&config.artifacts);
    Pipeline::new(
        artifacts,
        PipelineOptions { fallback_encoder: config.fallback_encoder },
    )
}
