//! FlightScope LLM
//!
//! Provider-agnostic chat completion trait, an OpenAI-compatible HTTP client,
//! and the question answering service that turns a flight summary and a user
//! question into an [`Answer`].

use async_trait::async_trait;
use flightscope_core::LlmError;

pub mod answer;
pub mod offline;
pub mod prompt;
pub mod providers;
pub mod service;

pub use answer::{Answer, EMPTY_REPLY_FALLBACK};
pub use offline::offline_answer;
pub use prompt::{build_system_prompt, display_name, sample_questions};
pub use providers::{OpenAICompatClient, ProviderKind};
pub use service::{AnsweringConfig, QuestionAnsweringService};

/// Result type alias for provider calls.
pub type LlmResult<T> = Result<T, LlmError>;

// ============================================================================
// CHAT PROVIDER TRAIT
// ============================================================================

/// A single non-streaming chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    /// System instructions.
    pub system: String,
    /// The user's message, passed through verbatim.
    pub user: String,
    pub max_tokens: i32,
    pub temperature: f32,
}

/// Trait for chat completion providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// # Example
/// ```ignore
/// struct MyProvider { /* ... */ }
///
/// #[async_trait]
/// impl ChatProvider for MyProvider {
///     async fn complete(&self, request: &ChatRequest) -> LlmResult<Option<String>> {
///         // Call the model
///     }
///     fn name(&self) -> &str { "my-provider" }
/// }
/// ```
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one completion.
    ///
    /// # Returns
    /// * `Ok(Some(text))` - The first choice's content
    /// * `Ok(None)` - The provider answered without any content
    /// * `Err(LlmError)` - Transport, status or decoding failure
    async fn complete(&self, request: &ChatRequest) -> LlmResult<Option<String>>;

    /// Provider identifier used in logs and error messages.
    fn name(&self) -> &str;
}
