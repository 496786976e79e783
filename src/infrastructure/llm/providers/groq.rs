//! Groq Provider - Fast AI inference

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::infrastructure::llm::config::{LLMConfig, DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL};
use crate::infrastructure::llm::{LLMError, LLMMessage, LLMResponse, LLMResult, LLM};

/// Longest slice of an error body carried into an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Groq provider
pub struct GroqProvider {
    api_key: Option<String>,
    client: Client,
    model: String,
    base_url: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl GroqProvider {
    pub fn new(api_key: Option<String>, model: Option<&str>) -> Self {
        Self {
            api_key,
            client: Client::new(),
            model: model.unwrap_or(DEFAULT_GROQ_MODEL).to_string(),
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            temperature: None,
            max_tokens: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn from_config(config: &LLMConfig) -> Self {
        Self::new(config.groq_api_key.clone(), Some(&config.groq_model))
            .with_base_url(&config.groq_base_url)
            .with_defaults(config.temperature, config.max_tokens)
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_defaults(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the completions endpoint
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// API request structure
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<LLMMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

/// API response structure
#[derive(Deserialize, Debug)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<Choice>,
}

/// Choice in response
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

/// Response message
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

fn transport_error(err: reqwest::Error) -> LLMError {
    if err.is_timeout() {
        LLMError::Timeout
    } else {
        LLMError::NetworkError(err.to_string())
    }
}

#[async_trait]
impl LLM for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn chat(
        &self,
        messages: Vec<LLMMessage>,
        model: Option<&str>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LLMResult<LLMResponse> {
        let api_key = self.api_key.as_deref().ok_or(LLMError::MissingApiKey)?;
        let model = model.unwrap_or(&self.model);

        let request = ChatRequest {
            model,
            messages,
            temperature: temperature.or(self.temperature),
            max_tokens: max_tokens.or(self.max_tokens),
            stream: false,
        };

        tracing::debug!(model, messages = request.messages.len(), "sending completion request");

        let response = self.client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LLMError::RateLimited);
        }

        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(LLMError::ApiError(format!("status: {}, body: {}", status, body)));
        }

        let chat_response: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| LLMError::ParseError(e.to_string()))?;

        let choice = chat_response.choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::ParseError("No choices in response".to_string()))?;

        let content = choice.message.content
            .ok_or_else(|| LLMError::ParseError("Completion has no content".to_string()))?;

        Ok(LLMResponse {
            content,
            model: chat_response.model.unwrap_or_else(|| model.to_string()),
            finish_reason: choice.finish_reason,
        })
    }
}
