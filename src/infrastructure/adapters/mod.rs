//! Hosting adapters for the interaction core

pub mod http;
