//! LLM Providers

pub mod groq;

pub use groq::GroqProvider;
