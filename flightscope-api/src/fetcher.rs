//! Flight Data Fetcher
//!
//! [`FlightApiClient`] performs the outbound schedule calls;
//! [`FlightDataFetcher`] validates the airport, consults the injected cache,
//! and combines the arrivals and departures sections.

use std::sync::Arc;

use async_trait::async_trait;
use flightscope_core::{
    is_supported, FetchError, ScheduleData, ScheduleMode, ScheduleSource, SourceError,
};
use flightscope_storage::{CacheRead, TtlCache};
use reqwest::Client;
use serde_json::Value;

use crate::config::FlightApiConfig;
use crate::error::{ApiError, ApiResult};

// ============================================================================
// FLIGHT API CLIENT
// ============================================================================

/// HTTP client for the flight schedule API.
///
/// Built once at startup; the inner [`reqwest::Client`] pools connections and
/// applies the configured timeout to every call.
#[derive(Clone)]
pub struct FlightApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FlightApiClient {
    pub fn new(config: &FlightApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::internal_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn schedule_url(&self) -> String {
        format!("{}/schedule/{}", self.base_url, self.api_key)
    }
}

#[async_trait]
impl ScheduleSource for FlightApiClient {
    async fn fetch(&self, airport_code: &str, mode: ScheduleMode) -> Result<Value, SourceError> {
        let response = self
            .client
            .get(self.schedule_url())
            .query(&[("mode", mode.as_str()), ("day", "1"), ("iata", airport_code)])
            .send()
            .await
            // The URL carries the API key.
            .map_err(|e| SourceError::Transport {
                reason: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| SourceError::Transport {
            reason: e.without_url().to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| SourceError::MalformedBody {
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Debug for FlightApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// FETCHER
// ============================================================================

/// Cache key for an airport's combined schedule.
pub fn cache_key(airport_code: &str) -> String {
    format!("arrivals_{}", airport_code)
}

/// Fetches an airport's schedule through a cache.
///
/// Both collaborators are injected. Concurrent misses on one airport each go
/// to the source; the last writer's result stays cached.
#[derive(Clone)]
pub struct FlightDataFetcher {
    source: Arc<dyn ScheduleSource>,
    cache: Arc<TtlCache<ScheduleData>>,
}

impl FlightDataFetcher {
    pub fn new(source: Arc<dyn ScheduleSource>, cache: Arc<TtlCache<ScheduleData>>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<TtlCache<ScheduleData>> {
        &self.cache
    }

    /// Arrivals and departures for `airport_code`, from cache when fresh.
    ///
    /// A section whose call fails at the transport level or with a non-success
    /// status is left `null`. A body that is not JSON fails the whole fetch.
    /// Results where both sections failed are returned but not cached.
    pub async fn get_arrivals(
        &self,
        airport_code: &str,
    ) -> Result<CacheRead<ScheduleData>, FetchError> {
        if !is_supported(airport_code) {
            return Err(FetchError::InvalidAirportCode {
                code: airport_code.to_string(),
            });
        }

        let key = cache_key(airport_code);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(airport_code, cached_at = %hit.cached_at(), "Schedule cache hit");
            return Ok(hit);
        }
        tracing::debug!(airport_code, "Schedule cache miss, fetching");

        let (arrivals, departures) = tokio::join!(
            self.source.fetch(airport_code, ScheduleMode::Arrivals),
            self.source.fetch(airport_code, ScheduleMode::Departures),
        );

        let mut data = ScheduleData::empty(airport_code);
        for (mode, result) in [
            (ScheduleMode::Arrivals, arrivals),
            (ScheduleMode::Departures, departures),
        ] {
            match result {
                Ok(payload) => data.set_section(mode, payload),
                Err(SourceError::MalformedBody { reason }) => {
                    return Err(FetchError::Upstream {
                        mode: mode.to_string(),
                        reason,
                    });
                }
                Err(err) => {
                    tracing::warn!(airport_code, %mode, error = %err, "Schedule section unavailable");
                }
            }
        }

        if data.has_any_section() {
            let fetched_at = self.cache.insert(&key, data.clone());
            Ok(CacheRead::from_origin(data, fetched_at))
        } else {
            tracing::warn!(airport_code, "Both schedule sections failed, result not cached");
            Ok(CacheRead::from_origin(data, self.cache.now()))
        }
    }
}

impl std::fmt::Debug for FlightDataFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightDataFetcher")
            .field("cache", &self.cache)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
