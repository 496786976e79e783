//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Interactions: Signature verification, parsing, dispatching, formatting
//! - Commands: Slash command handlers and the default registry
//! - Services: The hosting-independent interaction core
//! - Errors: Domain-specific errors

pub mod commands;
pub mod errors;
pub mod interactions;
pub mod services;
