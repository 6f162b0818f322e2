//! Shared helpers for router-level tests.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use flightscope_api::{create_api_router, AppConfig, AppState};
use flightscope_core::ScheduleSource;
use flightscope_llm::ChatProvider;
use flightscope_storage::{CacheConfig, TtlCache};
use flightscope_test_utils::{StubChatProvider, StubScheduleSource};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

const BODY_LIMIT: usize = 1024 * 1024;

pub struct TestApp {
    pub router: Router,
    pub source: Arc<StubScheduleSource>,
    pub provider: Option<Arc<StubChatProvider>>,
}

pub fn test_config() -> AppConfig {
    AppConfig::new("test_flight_key")
}

pub fn test_app(
    config: AppConfig,
    source: StubScheduleSource,
    provider: Option<StubChatProvider>,
) -> TestApp {
    let source = Arc::new(source);
    let provider = provider.map(Arc::new);
    let cache = Arc::new(TtlCache::new(
        CacheConfig::default().with_ttl(config.cache_ttl),
    ));

    let state = AppState::with_components(
        config,
        source.clone() as Arc<dyn ScheduleSource>,
        cache,
        provider.clone().map(|p| p as Arc<dyn ChatProvider>),
    );

    TestApp {
        router: create_api_router(state),
        source,
        provider,
    }
}

pub fn form_request(body: &str) -> Result<Request<Body>, String> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .map_err(|e| e.to_string())
}

pub fn get_request(uri: &str) -> Result<Request<Body>, String> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .map_err(|e| e.to_string())
}

pub async fn send_text(router: &Router, request: Request<Body>) -> Result<(StatusCode, String), String> {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {:?}", e))?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .map_err(|e| format!("Body read failed: {}", e))?;
    let text = String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())?;
    Ok((status, text))
}

pub async fn send_json(router: &Router, request: Request<Body>) -> Result<(StatusCode, Value), String> {
    let (status, text) = send_text(router, request).await?;
    let json = serde_json::from_str(&text).map_err(|e| format!("Invalid JSON {:?}: {}", text, e))?;
    Ok((status, json))
}
