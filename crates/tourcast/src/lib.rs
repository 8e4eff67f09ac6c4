//! # tourcast
//!
//! Tourism arrivals prediction for Sub-Saharan African countries.
//!
//! This crate re-exports the library crates of the workspace:
//!
//! - [`types`]: records, validation, feature vectors and errors
//! - [`config`]: service configuration
//! - [`engine`]: artifacts, feature preparation and the prediction pipeline
//!
//! The HTTP service lives in the `tourcast-server` binary.
//!
//! # Quick Start
//!
//! ```rust
//! use tourcast::prelude::*;
//!
//! let model = ModelFile::Linear(LinearModel {
//!     coefficients: vec![0.0; 8],
//!     intercept: 1_500_000.0,
//! });
//! let artifacts = Artifacts::new(
//!     Some(model.into_regressor().unwrap()),
//!     StandardScaler::fitted(&[0.0; 8], &[1.0; 8]).unwrap(),
//!     LabelEncoder::fit(["Angola", "Kenya"]),
//! );
//! let pipeline = Pipeline::new(artifacts, PipelineOptions::default());
//!
//! let body = br#"{"country": "Kenya", "year": 2015, "tourism_receipts": 1.0e9,
//!     "tourism_exports": 12.0, "tourism_expenditures": 4.0, "gdp": 6.0e12,
//!     "inflation": 6.6}"#;
//! assert_eq!(pipeline.predict_json(body).unwrap(), 1_500_000.0);
//! ```

pub use tourcast_config as config;
pub use tourcast_core as types;
pub use tourcast_engine as engine;

/// Commonly used types for building and running a prediction pipeline.
pub mod prelude {
    pub use tourcast_config::{ArtifactPaths, ServiceConfig};
    pub use tourcast_core::{
        parse_record, Artifact, ErrorKind, FeatureVector, PredictError, PredictionRecord, RecordInput,
    };
    pub use tourcast_engine::{
        pipeline_from_config, Artifacts, LabelEncoder, LinearModel, ModelFile, Pipeline, PipelineOptions,
        RandomForest, RegressionTree, Regressor, StandardScaler,
    };
}
