//! Prediction HTTP handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use tracing::{error, warn};

use tourcast_core::RecordInput;

use crate::dto::PredictionResponse;
use crate::error::{AppError, ErrorResponse};
use crate::ServerState;

/// Predict Tourism Arrivals
///
/// Scores one country-year record with the pre-trained model.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    request_body = RecordInput,
    responses(
        (status = 200, description = "Predicted number of tourism arrivals", body = PredictionResponse),
        (status = 422, description = "Malformed or out-of-range field", body = ErrorResponse),
        (status = 500, description = "Unknown country, missing artifact or inference failure", body = ErrorResponse),
    )
)]
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, AppError> {
    let prediction = state.pipeline.predict_json(&body).map_err(|e| {
        if e.kind().is_client_fault() {
            warn!("Prediction rejected ({}): {}", e.kind(), e);
        } else {
            error!("Prediction failed ({}): {}", e.kind(), e);
        }
        AppError::from(e)
    })?;

    Ok(Json(PredictionResponse { predicted_tourism_arrivals: prediction }))
}
