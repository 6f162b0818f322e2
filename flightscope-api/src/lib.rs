//! FlightScope API - HTTP Layer
//!
//! Serves the question form, the analyze endpoint and health probes. Schedules
//! come from the flight API through a TTL cache; answers come from an
//! OpenAI-compatible chat model or the offline responder.

#[macro_use]
pub mod macros;

pub mod config;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, FlightApiConfig, LlmConfig, ServerConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use fetcher::{cache_key, FlightApiClient, FlightDataFetcher};
pub use routes::{create_api_router, AnalyzeResponse, DataSource, HealthResponse, HealthStatus};
pub use state::AppState;
