//! Error types for FlightScope operations

use thiserror::Error;

/// Flight data fetch errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Unsupported airport: {code}")]
    InvalidAirportCode { code: String },

    #[error("Flight API returned an unusable response for {mode}: {reason}")]
    Upstream { mode: String, reason: String },
}

/// Errors from a single outbound schedule call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    #[error("Flight API responded with status {status}")]
    Status { status: u16 },

    #[error("Malformed response body: {reason}")]
    MalformedBody { reason: String },
}

/// Schedule entry decoding errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Schedule entry is missing the flight object")]
    MissingFlight,

    #[error("Schedule entry could not be decoded: {reason}")]
    Decode { reason: String },
}

/// LLM provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("No LLM provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: i64,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all FlightScope errors.
#[derive(Debug, Clone, Error)]
pub enum FlightscopeError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for FlightScope operations.
pub type FlightscopeResult<T> = Result<T, FlightscopeError>;

// =============================================================================
// TESTS
// =============================================================================
