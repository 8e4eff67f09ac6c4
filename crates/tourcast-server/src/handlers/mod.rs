//! HTTP route handlers for the prediction server.

pub mod predict;

use axum::Json;

use crate::dto::RootResponse;

pub const ROOT_MESSAGE: &str = "Welcome to the Tourism Arrivals Prediction API! \
    Visit /docs for the interactive API documentation (Swagger UI).";

/// API Root / Health Check
///
/// Answers even when artifacts failed to load.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Basic API status message", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse { message: ROOT_MESSAGE.to_string() })
}
