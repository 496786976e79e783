//! LLM Configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Completion service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LLMConfig {
    /// Groq API key; completion commands reply with an error while unset
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_base_url: String,

    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            temperature: Some(0.7),
            max_tokens: Some(1024),
            timeout_secs: 10,
        }
    }
}

impl LLMConfig {
    /// Override fields from an environment lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.groq_api_key = Some(key);
        }
        if let Some(model) = lookup("GROQ_MODEL").filter(|m| !m.trim().is_empty()) {
            self.groq_model = model;
        }
        if let Some(temp) = lookup("LLM_TEMPERATURE") {
            if let Ok(t) = temp.parse() {
                self.temperature = Some(t);
            }
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.groq_api_key.as_deref()
    }
}
