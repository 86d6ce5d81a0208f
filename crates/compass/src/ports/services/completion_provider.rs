//! Completion Provider Port
//!
//! Abstract interface for chat-style LLM completions. Implementations wrap a
//! single provider (OpenAI, Anthropic, ...) and make exactly one attempt per
//! call - retry policy is deliberately absent; callers degrade to fallback
//! content instead of waiting on retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::GenerationError;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Generation parameters for one completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature (0.0 - 2.0)
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Raw completion returned by the provider.
///
/// The text is uninterpreted; decoding it is the response mapper's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text content
    pub content: String,
    /// Model that generated the response
    pub model: String,
}

/// Chat completion interface
///
/// Implementations must not retry and must not inspect the returned text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion from role-tagged messages
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<Completion, GenerationError>;

    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
