//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tourcast_core::{ErrorKind, PredictError};
use utoipa::ToSchema;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    Predict(PredictError),
}

impl From<PredictError> for AppError {
    fn from(e: PredictError) -> Self {
        AppError::Predict(e)
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        let AppError::Predict(e) = self;
        e.kind()
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.kind())
    }
}

/// Unknown countries map to 500: an unrecognized name may mean an outdated encoder.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::UnknownCategory => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Inference => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body of every failed request.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable cause, naming the missing artifact or unknown country.
    pub detail: String,
    pub kind: ErrorKind,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let AppError::Predict(e) = self;
        let body = ErrorResponse { detail: e.to_string(), kind: e.kind() };
        (status, Json(body)).into_response()
    }
}
