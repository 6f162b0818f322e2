//! OpenAI-compatible HTTP client

use super::types::{ApiError, CompletionRequest, CompletionResponse, Message};
use crate::providers::{invalid_response, rate_limited, request_failed, ProviderKind};
use crate::{ChatProvider, ChatRequest, LlmResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Client for any endpoint speaking the OpenAI chat completion format.
///
/// Holds one long-lived [`reqwest::Client`] so connections are pooled across
/// requests.
pub struct OpenAICompatClient {
    client: Client,
    api_key: String,
    base_url: String,
    kind: ProviderKind,
}

impl OpenAICompatClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `api_key` - Bearer token for the endpoint
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`
    /// * `timeout` - Optional whole-request timeout; `None` waits indefinitely
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> LlmResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let kind = ProviderKind::from_base_url(&base_url);

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            request_failed(kind.name(), 0, format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
            kind,
        })
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `{base_url}/{endpoint}` and decode the JSON reply.
    pub async fn request<Req: Serialize, Res: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Req,
    ) -> LlmResult<Res> {
        let provider = self.kind.name();
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| request_failed(provider, 0, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let retry_after_ms = parse_retry_after_ms(response.headers()).unwrap_or(0);

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| invalid_response(provider, format!("Failed to parse response: {}", e)))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let error_msg = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.message,
                Err(_) => error_text,
            };

            Err(match status {
                StatusCode::TOO_MANY_REQUESTS => rate_limited(provider, retry_after_ms),
                _ => request_failed(provider, status.as_u16() as i32, error_msg),
            })
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAICompatClient {
    async fn complete(&self, request: &ChatRequest) -> LlmResult<Option<String>> {
        let body = CompletionRequest {
            model: request.model.clone(),
            messages: vec![
                Message::system(request.system.clone()),
                Message::user(request.user.clone()),
            ],
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
        };

        let response: CompletionResponse = self.request("chat/completions", &body).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                provider = self.kind.name(),
                prompt_tokens = usage.prompt_tokens,
                total_tokens = usage.total_tokens,
                "Chat completion finished"
            );
        }

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty()))
    }

    fn name(&self) -> &str {
        self.kind.name()
    }
}

fn parse_retry_after_ms(headers: &reqwest::header::HeaderMap) -> Option<i64> {
    headers
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<f64>().ok())
        .map(|seconds| (seconds * 1000.0) as i64)
}

impl std::fmt::Debug for OpenAICompatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAICompatClient")
            .field("base_url", &self.base_url)
            .field("kind", &self.kind)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightscope_core::LlmError;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() -> Result<(), String> {
        let client = OpenAICompatClient::new("k", "https://api.perplexity.ai/", None)
            .map_err(|e| e.to_string())?;
        assert_eq!(client.base_url(), "https://api.perplexity.ai");
        assert_eq!(client.kind(), ProviderKind::Perplexity);
        Ok(())
    }

    #[test]
    fn test_debug_redacts_api_key() -> Result<(), String> {
        let client = OpenAICompatClient::new("sk-secret", "https://api.openai.com/v1", None)
            .map_err(|e| e.to_string())?;
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
        Ok(())
    }

    #[test]
    fn test_parse_retry_after() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after_ms(&headers), None);
        headers.insert("retry-after", HeaderValue::from_static("1.5"));
        assert_eq!(parse_retry_after_ms(&headers), Some(1500));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_failed() -> Result<(), String> {
        let client = OpenAICompatClient::new(
            "k",
            "http://127.0.0.1:1/v1",
            Some(Duration::from_secs(2)),
        )
        .map_err(|e| e.to_string())?;
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            system: "s".to_string(),
            user: "u".to_string(),
            max_tokens: 10,
            temperature: 0.1,
        };

        match client.complete(&request).await {
            Err(LlmError::RequestFailed { status, .. }) => {
                assert_eq!(status, 0);
                Ok(())
            }
            other => Err(format!("expected RequestFailed, got {:?}", other)),
        }
    }
}
