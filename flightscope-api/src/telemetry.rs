//! Tracing subscriber initialization.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ApiError, ApiResult};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "flightscope_api=debug,flightscope_llm=debug,tower_http=debug,info"
    } else {
        "flightscope_api=info,tower_http=info,info"
    }
}

/// Install the global tracing subscriber.
///
/// JSON lines by default; human-readable output when `pretty` is set.
/// `RUST_LOG` overrides the level filter either way.
pub fn init_tracing(pretty: bool) -> ApiResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(pretty)));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if pretty {
        registry.with(fmt::layer().pretty()).try_init()
    } else {
        registry.with(fmt::layer().json()).try_init()
    };
    result.map_err(|e| ApiError::internal_error(format!("Failed to init subscriber: {}", e)))?;

    tracing::info!(pretty, version = env!("CARGO_PKG_VERSION"), "Tracing initialized");
    Ok(())
}
