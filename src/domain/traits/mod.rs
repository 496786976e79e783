//! Domain traits - Abstractions for infrastructure implementations

pub mod directory;

pub use directory::{AccountDirectory, LinkLookup, RobloxProfile};
