mod dto;
mod error;
mod handlers;
mod openapi;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tourcast_config::ServiceConfig;
use tourcast_engine::{pipeline_from_config, Pipeline};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub struct ServerState {
    pub pipeline: Pipeline,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let config = ServiceConfig::from_env()?;
    let state = Arc::new(init_server_state(&config));
    let app = build_router(state);

    info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_server_state(config: &ServiceConfig) -> ServerState {
    let pipeline = pipeline_from_config(config);

    let status = pipeline.status();
    if status.is_ready() {
        info!("All artifacts loaded, ready to serve predictions");
    } else {
        warn!(
            model = status.model,
            scaler = status.scaler,
            encoder = ?status.encoder,
            "Starting in degraded mode, predictions may fail"
        );
    }

    ServerState { pipeline }
}

fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                id = %uuid::Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/", get(handlers::root))
        .route("/predict", post(handlers::predict::predict))
        .merge(SwaggerUi::new(openapi::DOCS_PATH).url(openapi::OPENAPI_PATH, openapi::ApiDoc::openapi()))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, StatusCode};
    use tourcast_core::PredictError;
    use tourcast_engine::{Artifacts, LabelEncoder, PipelineOptions, Regressor, StandardScaler};
    use tower::ServiceExt;

    const ANGOLA: &str = r#"{"country": "Angola", "year": 2020, "tourism_receipts": 150000000.0,
        "tourism_exports": 5.5, "tourism_expenditures": 3.0, "gdp": 10000000000.0,
        "inflation": 5.0, "unemployment": 7.5}"#;

    struct FixedModel(f64);

    impl Regressor for FixedModel {
        fn n_features(&self) -> usize {
            8
        }

        fn predict(&self, _features: &[f64]) -> Result<f64, PredictError> {
            Ok(self.0)
        }
    }

    fn app(artifacts: Artifacts) -> Router {
        let pipeline = Pipeline::new(artifacts, PipelineOptions::default());
        build_router(Arc::new(ServerState { pipeline }))
    }

    fn loaded() -> Artifacts {
        Artifacts::new(
            Some(Box::new(FixedModel(42_000.0))),
            StandardScaler::fitted(&[0.0; 8], &[1.0; 8]).unwrap(),
            LabelEncoder::fit(["Angola", "Kenya"]),
        )
    }

    fn post_predict(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(res: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root() {
        let res = app(loaded())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["message"], handlers::ROOT_MESSAGE);
    }

    #[tokio::test]
    async fn test_predict_success() {
        let res = app(loaded()).oneshot(post_predict(ANGOLA)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["predicted_tourism_arrivals"], 42_000.0);
    }

    #[tokio::test]
    async fn test_predict_unknown_country() {
        let res = app(loaded())
            .oneshot(post_predict(&ANGOLA.replace("Angola", "Atlantis")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(res).await;
        assert_eq!(body["kind"], "unknown_category");
        assert!(body["detail"].as_str().unwrap().contains("Atlantis"));
    }

    #[tokio::test]
    async fn test_predict_invalid_year() {
        let res = app(loaded())
            .oneshot(post_predict(&ANGOLA.replace("2020", "1850")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(res).await;
        assert_eq!(body["kind"], "validation");
        assert!(body["detail"].as_str().unwrap().contains("year"));
    }

    #[tokio::test]
    async fn test_predict_malformed_body() {
        let res = app(loaded()).oneshot(post_predict("{")).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(res).await["kind"], "validation");
    }

    #[tokio::test]
    async fn test_degraded_mode() {
        let app = app(Artifacts::default());

        let res = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app.oneshot(post_predict(ANGOLA)).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(res).await;
        assert_eq!(body["kind"], "configuration");
        assert!(body["detail"].as_str().unwrap().contains("model"));
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let res = app(loaded())
            .oneshot(Request::builder().uri(openapi::OPENAPI_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let doc = json_body(res).await;
        assert_eq!(doc["info"]["title"], "Tourism Arrivals Prediction API");
        assert!(doc["paths"]["/predict"]["post"].is_object());
        assert!(doc["components"]["schemas"]["RecordInput"].is_object());
        assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
    }

    #[tokio::test]
    async fn test_docs_page() {
        let res = app(loaded())
            .oneshot(Request::builder().uri("/docs/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/predict")
            .header(header::ORIGIN, "https://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let res = app(loaded()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
