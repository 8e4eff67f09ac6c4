//! OpenAPI document served behind the Swagger UI at `/docs`.

use tourcast_core::{ErrorKind, RecordInput};
use utoipa::OpenApi;

use crate::dto::{PredictionResponse, RootResponse};
use crate::error::ErrorResponse;
use crate::handlers;

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tourism Arrivals Prediction API",
        description = "API for predicting tourism arrivals in Sub-Saharan African countries using a pre-trained machine learning model.",
        version = "1.0.0"
    ),
    paths(handlers::root, handlers::predict::predict),
    components(schemas(RecordInput, PredictionResponse, RootResponse, ErrorResponse, ErrorKind)),
    tags(
        (name = "health", description = "Service status"),
        (name = "prediction", description = "Tourism arrivals inference")
    )
)]
pub struct ApiDoc;
