//! Answer produced by the question answering service.

/// Text shown when the model replied without content.
pub const EMPTY_REPLY_FALLBACK: &str = "Не удалось получить ответ";

/// Outcome of answering a question.
///
/// Callers always get something to show the user; the variant tells them
/// where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Produced by the language model.
    Model(String),
    /// Templated locally because no provider is configured.
    Offline(String),
    /// The provider call failed.
    Degraded { reason: String },
}

impl Answer {
    /// User-facing text. Never empty.
    pub fn text(&self) -> String {
        match self {
            Answer::Model(text) | Answer::Offline(text) => text.clone(),
            Answer::Degraded { reason } => format!("Ошибка при обработке запроса: {}", reason),
        }
    }

    /// Short label for response bodies and logs.
    pub fn source(&self) -> &'static str {
        match self {
            Answer::Model(_) => "model",
            Answer::Offline(_) => "offline",
            Answer::Degraded { .. } => "degraded",
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Answer::Degraded { .. })
    }
}
