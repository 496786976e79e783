//! LLM integration - AI completion adapter

pub mod traits;
pub mod config;
pub mod providers;


pub use traits::{LLM, LLMMessage, LLMResponse, LLMError, LLMResult};
pub use config::LLMConfig;
pub use providers::GroqProvider;
