//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - LLM: AI completion adapter
//! - Roblox: Account-linkage and profile lookups
//! - Adapters: Hosting integrations (HTTP webhook)

pub mod adapters;
pub mod config;
pub mod llm;
pub mod roblox;
