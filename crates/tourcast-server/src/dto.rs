use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// === HTTP DTOs ===

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    /// API status message.
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    /// Predicted number of tourism arrivals.
    #[schema(example = 1250000.0)]
    pub predicted_tourism_arrivals: f64,
}
