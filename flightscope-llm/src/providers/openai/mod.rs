//! OpenAI-compatible chat completion provider.

pub mod client;
pub mod types;

pub use client::OpenAICompatClient;
