//! Question answering over a flight summary.

use crate::answer::{Answer, EMPTY_REPLY_FALLBACK};
use crate::offline::offline_answer;
use crate::prompt::build_system_prompt;
use crate::{ChatProvider, ChatRequest};
use flightscope_core::FlightSummary;
use std::sync::Arc;

/// Generation parameters for live answers.
#[derive(Debug, Clone, PartialEq)]
pub struct AnsweringConfig {
    pub model: String,
    pub max_tokens: i32,
    pub temperature: f32,
}

impl Default for AnsweringConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1000,
            temperature: 0.1,
        }
    }
}

/// Answers user questions about an airport's flights.
///
/// With a provider configured every call makes exactly one chat completion.
/// Without one, answers are templated locally. [`answer`](Self::answer)
/// never fails: provider errors come back as [`Answer::Degraded`].
#[derive(Clone)]
pub struct QuestionAnsweringService {
    provider: Option<Arc<dyn ChatProvider>>,
    config: AnsweringConfig,
}

impl QuestionAnsweringService {
    pub fn new(provider: Arc<dyn ChatProvider>, config: AnsweringConfig) -> Self {
        Self {
            provider: Some(provider),
            config,
        }
    }

    /// A service that only produces offline answers.
    pub fn offline() -> Self {
        Self {
            provider: None,
            config: AnsweringConfig::default(),
        }
    }

    /// True when answers come from a language model.
    pub fn is_live(&self) -> bool {
        self.provider.is_some()
    }

    pub fn config(&self) -> &AnsweringConfig {
        &self.config
    }

    pub async fn answer(&self, question: &str, summary: &FlightSummary, airport_code: &str) -> Answer {
        let Some(provider) = &self.provider else {
            tracing::debug!(airport_code, "No LLM provider configured, answering offline");
            return Answer::Offline(offline_answer(question, summary, airport_code));
        };

        let request = ChatRequest {
            model: self.config.model.clone(),
            system: build_system_prompt(airport_code, &summary.to_prompt_json()),
            user: question.to_string(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        match provider.complete(&request).await {
            Ok(Some(text)) => Answer::Model(text),
            Ok(None) => {
                tracing::warn!(provider = provider.name(), airport_code, "Model returned no content");
                Answer::Model(EMPTY_REPLY_FALLBACK.to_string())
            }
            Err(err) => {
                tracing::warn!(
                    provider = provider.name(),
                    airport_code,
                    error = %err,
                    "Chat completion failed, returning degraded answer"
                );
                Answer::Degraded {
                    reason: err.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Debug for QuestionAnsweringService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionAnsweringService")
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .field("config", &self.config)
            .finish()
    }
}
