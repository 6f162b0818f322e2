//! LLM provider implementations
//!
//! Both supported services speak the OpenAI chat completion wire format, so a
//! single client covers them; [`ProviderKind`] only picks names and defaults.

pub mod openai;

pub use openai::OpenAICompatClient;

use flightscope_core::LlmError;

/// Which service an OpenAI-compatible base URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Perplexity,
    /// Any other OpenAI-compatible endpoint.
    Compatible,
}

impl ProviderKind {
    pub fn from_base_url(base_url: &str) -> Self {
        let url = base_url.to_ascii_lowercase();
        if url.contains("perplexity.ai") {
            ProviderKind::Perplexity
        } else if url.contains("openai.com") {
            ProviderKind::OpenAI
        } else {
            ProviderKind::Compatible
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Perplexity => "perplexity",
            ProviderKind::Compatible => "openai-compatible",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Perplexity => "sonar",
            ProviderKind::OpenAI | ProviderKind::Compatible => "gpt-4o-mini",
        }
    }
}

pub(crate) fn request_failed(provider: &str, status: i32, message: impl Into<String>) -> LlmError {
    LlmError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    }
}

pub(crate) fn rate_limited(provider: &str, retry_after_ms: i64) -> LlmError {
    LlmError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms,
    }
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> LlmError {
    LlmError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_base_url() {
        assert_eq!(
            ProviderKind::from_base_url("https://api.perplexity.ai"),
            ProviderKind::Perplexity
        );
        assert_eq!(
            ProviderKind::from_base_url("https://api.openai.com/v1"),
            ProviderKind::OpenAI
        );
        assert_eq!(
            ProviderKind::from_base_url("http://localhost:11434/v1"),
            ProviderKind::Compatible
        );
    }

    #[test]
    fn test_default_models() {
        assert_eq!(ProviderKind::OpenAI.default_model(), "gpt-4o-mini");
        assert_eq!(ProviderKind::Perplexity.default_model(), "sonar");
    }
}
