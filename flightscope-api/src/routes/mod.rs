//! HTTP Routes Module
//!
//! - GET  /             - question form
//! - POST /analyze      - answer a question about an airport's flights
//! - GET  /health/ping  - simple pong
//! - GET  /health/live  - liveness with cache statistics

pub mod analyze;
pub mod health;
pub mod index;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

pub use analyze::{AnalyzeForm, AnalyzeResponse, DataSource};
pub use health::{HealthDetails, HealthResponse, HealthStatus};

fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!("CORS: allowing origins: {:?}", config.cors_origins);
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Create the application router with every route, tracing and CORS.
pub fn create_api_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server);

    Router::new()
        .route("/", get(index::index))
        .route("/analyze", post(analyze::analyze))
        .route("/health/ping", get(health::ping))
        .route("/health/live", get(health::liveness))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
