//! Domain layer - Core business objects and the seams to the outside world
//! 
//! This layer contains:
//! - Entities: Interactions, commands, and command results
//! - Traits: Abstractions for infrastructure (account directory)

pub mod entities;
pub mod traits;
