//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use flightscope_core::{ScheduleData, ScheduleSource};
use flightscope_llm::{ChatProvider, OpenAICompatClient, QuestionAnsweringService};
use flightscope_storage::{CacheConfig, TtlCache};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::fetcher::{FlightApiClient, FlightDataFetcher};

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Cached schedule fetcher.
    pub fetcher: Arc<FlightDataFetcher>,
    pub answering: Arc<QuestionAnsweringService>,
    pub start_time: Instant,
}

crate::impl_from_ref!(Arc<AppConfig>, config);
crate::impl_from_ref!(Arc<FlightDataFetcher>, fetcher);
crate::impl_from_ref!(Arc<QuestionAnsweringService>, answering);
crate::impl_from_ref!(Instant, start_time);

impl AppState {
    /// Wire state from explicit collaborators.
    ///
    /// `provider` of `None` makes every answer offline.
    pub fn with_components(
        config: AppConfig,
        source: Arc<dyn ScheduleSource>,
        cache: Arc<TtlCache<ScheduleData>>,
        provider: Option<Arc<dyn ChatProvider>>,
    ) -> Self {
        let answering = match provider {
            Some(provider) => QuestionAnsweringService::new(provider, config.llm.answering_config()),
            None => QuestionAnsweringService::offline(),
        };

        Self {
            config: Arc::new(config),
            fetcher: Arc::new(FlightDataFetcher::new(source, cache)),
            answering: Arc::new(answering),
            start_time: Instant::now(),
        }
    }

    /// Build production state: real HTTP clients and an in-memory cache.
    pub fn from_config(config: AppConfig) -> ApiResult<Self> {
        let source: Arc<dyn ScheduleSource> = Arc::new(FlightApiClient::new(&config.flight_api)?);
        let cache = Arc::new(TtlCache::new(CacheConfig::default().with_ttl(config.cache_ttl)));

        let provider: Option<Arc<dyn ChatProvider>> = match &config.llm.api_key {
            Some(api_key) => {
                let client = OpenAICompatClient::new(
                    api_key.clone(),
                    config.llm.base_url.clone(),
                    config.llm.timeout,
                )
                .map_err(|e| ApiError::internal_error(format!("Failed to build LLM client: {}", e)))?;
                tracing::info!(
                    provider = client.kind().name(),
                    base_url = client.base_url(),
                    "LLM provider configured"
                );
                Some(Arc::new(client) as Arc<dyn ChatProvider>)
            }
            None => {
                tracing::info!("No LLM API key configured, answers will be generated offline");
                None
            }
        };

        Ok(Self::with_components(config, source, cache, provider))
    }
}
