//! FlightScope Server Entry Point
//!
//! Reads configuration from the environment, wires the state and starts the
//! Axum HTTP server.

use axum::Router;
use flightscope_api::telemetry::init_tracing;
use flightscope_api::{create_api_router, ApiError, ApiResult, AppConfig, AppState};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let config = AppConfig::from_env()?;
    init_tracing(config.server.debug)?;

    let host = config.server.host.clone();
    let port = config.server.port;
    let state = AppState::from_config(config)?;
    let app: Router = create_api_router(state);

    tracing::info!(%host, port, "Starting FlightScope server");

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}:{}: {}", host, port, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
