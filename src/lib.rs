//! Signed interaction webhook: verifies, classifies, and answers slash commands

pub mod application;
pub mod domain;
pub mod infrastructure;
