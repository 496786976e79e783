use async_trait::async_trait;

use crate::application::errors::LookupError;

/// Result of asking whether a Discord user has a linked Roblox account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkLookup {
    /// Linked Roblox user id
    Linked(String),
    NotLinked,
}

/// Public Roblox profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobloxProfile {
    pub id: String,
    pub name: String,
}

/// Account directory - abstraction over the account-linkage and profile services
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Resolve the Roblox account linked to a Discord user
    async fn linked_account(&self, discord_id: &str) -> Result<LinkLookup, LookupError>;

    /// Fetch a Roblox profile by user id
    async fn profile(&self, roblox_id: &str) -> Result<RobloxProfile, LookupError>;
}
