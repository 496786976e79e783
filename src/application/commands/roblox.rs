use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::application::errors::CommandError;
use crate::domain::entities::{CommandContext, CommandHandler};
use crate::domain::traits::{AccountDirectory, LinkLookup};

pub const NO_LINKED_ACCOUNT: &str = "No Roblox account linked.";

/// Discord user ids are snowflakes: unsigned 64-bit integers in decimal
static SNOWFLAKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,20}$").expect("valid snowflake pattern"));

/// `/roblox discord_id:<id>` - resolves the Roblox account linked to a Discord user
pub struct RobloxCommand {
    directory: Arc<dyn AccountDirectory>,
}

impl RobloxCommand {
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl CommandHandler for RobloxCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<String, CommandError> {
        let discord_id = ctx.required("discord_id")?.trim();
        if !SNOWFLAKE.is_match(discord_id) {
            return Err(CommandError::InvalidArgs(
                "discord_id must be a numeric Discord user ID".to_string(),
            ));
        }

        // The profile fetch needs the linked id, so the two calls stay sequential
        let roblox_id = match self.directory.linked_account(discord_id).await? {
            LinkLookup::Linked(id) => id,
            LinkLookup::NotLinked => {
                tracing::debug!(interaction_id = %ctx.interaction_id, "no linked roblox account");
                return Ok(NO_LINKED_ACCOUNT.to_string());
            }
        };

        let profile = self.directory.profile(&roblox_id).await?;
        Ok(format!("Found Roblox account: {} [ID: {}]", profile.name, roblox_id))
    }
}
