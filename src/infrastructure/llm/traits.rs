//! LLM traits - Unified completion interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chat message for LLM completions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LLMMessage {
    /// Role: "system" or "user"
    pub role: String,
    /// Message content
    pub content: String,
}

impl LLMMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// LLM response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    /// Text of the first completion
    pub content: String,
    /// Model used
    pub model: String,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// LLM errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LLMError {
    #[error("Missing API key")]
    MissingApiKey,
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Completion request timed out")]
    Timeout,
    #[error("Rate limited")]
    RateLimited,
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type for LLM operations
pub type LLMResult<T> = Result<T, LLMError>;

/// LLM Provider trait
///
/// One call is one outbound attempt; implementations never retry.
#[async_trait]
pub trait LLM: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Chat completion; `None` arguments fall back to the provider's defaults
    async fn chat(
        &self,
        messages: Vec<LLMMessage>,
        model: Option<&str>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LLMResult<LLMResponse>;
}
