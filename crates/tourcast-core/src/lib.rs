//! Core domain types and error definitions for tourcast.
//!
//! This crate provides the fundamental types shared across the tourcast workspace:
//!
//! - [`PredictError`] and [`ErrorKind`] — Error type for every prediction failure
//! - [`RecordInput`] and [`PredictionRecord`] — Raw and validated request records
//! - [`FeatureVector`] — The fixed-order numeric input the model consumes
//! - [`parse_record`] — The input validator
//!
//! # Example
//!
//! ```rust
//! use tourcast_core::{parse_record, ErrorKind};
//!
//! let body = br#"{
//!     "country": "Angola",
//!     "year": 2020,
//!     "tourism_receipts": 150000000.0,
//!     "tourism_exports": 5.5,
//!     "tourism_expenditures": 3.0,
//!     "gdp": 10000000000.0,
//!     "inflation": 5.0
//! }"#;
//!
//! let record = parse_record(body).unwrap();
//! assert_eq!(record.country(), "Angola");
//! assert_eq!(record.unemployment(), None);
//!
//! let err = parse_record(br#"{"country": "Angola"}"#).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! ```

mod features;
mod record;

pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use record::{parse_record, PredictionRecord, RecordInput, MAX_YEAR, MIN_YEAR};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// The three fitted objects the pipeline depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    /// The regression model.
    Model,
    /// The per-feature standard scaler.
    Scaler,
    /// The country label encoder.
    Encoder,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Artifact::Model => "model",
            Artifact::Scaler => "scaler",
            Artifact::Encoder => "label encoder",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while validating, preparing or scoring a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Malformed or out-of-range request field.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Country not among the encoder's known classes.
    #[error("Error during country encoding: unknown country '{0}'")]
    UnknownCategory(String),

    /// A required artifact is missing or was never fitted.
    #[error("The {artifact} is not available: {reason}")]
    Configuration { artifact: Artifact, reason: String },

    /// The model call itself failed.
    #[error("Inference failed: {0}")]
    Inference(String),
}

impl PredictError {
    /// Creates a Validation error from any message.
    pub fn validation(msg: impl Into<String>) -> Self {
        PredictError::Validation(msg.into())
    }

    /// Creates a Configuration error for the given artifact.
    pub fn configuration(artifact: Artifact, reason: impl Into<String>) -> Self {
        PredictError::Configuration { artifact, reason: reason.into() }
    }

    /// Creates an Inference error from any message.
    pub fn inference(msg: impl Into<String>) -> Self {
        PredictError::Inference(msg.into())
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::Validation(_) => ErrorKind::Validation,
            PredictError::UnknownCategory(_) => ErrorKind::UnknownCategory,
            PredictError::Configuration { .. } => ErrorKind::Configuration,
            PredictError::Inference(_) => ErrorKind::Inference,
        }
    }
}

impl From<serde_json::Error> for PredictError {
    fn from(err: serde_json::Error) -> Self {
        PredictError::Validation(err.to_string())
    }
}

/// Classification of a [`PredictError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    UnknownCategory,
    Configuration,
    Inference,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::UnknownCategory => "unknown_category",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Inference => "inference",
        }
    }

    /// Whether the caller, rather than the operator, caused the failure.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, ErrorKind::Validation | ErrorKind::UnknownCategory)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
