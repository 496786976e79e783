//! Slash commands - Handlers and the default registry

mod ai;
mod roblox;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{Command, CommandRegistry, OptionSpec};
use crate::domain::traits::AccountDirectory;
use crate::infrastructure::llm::LLM;

pub use ai::{CustomAiCommand, GroqCommand, CUSTOMAI_INSTRUCTIONS};
pub use roblox::{RobloxCommand, NO_LINKED_ACCOUNT};

pub const HELP_TEXT: &str = "Available commands:
/roblox discord_id:<Discord ID> → Lookup linked Roblox account
/groqq prompt:<text> → Ask AI a one-off question
/customai system_prompt:<text> [message:<text>] → Custom AI response (single-turn; use system_prompt for context, optional initial message)
/ping → Test response
/help → Show this menu";

/// Option type `STRING` in the platform's command schema
const OPTION_TYPE_STRING: u8 = 3;

/// Build the registry of every command the webhook serves
pub fn default_registry(directory: Arc<dyn AccountDirectory>, llm: Arc<dyn LLM>) -> CommandRegistry {
    CommandRegistry::new()
        .with(Command::new("roblox", Arc::new(RobloxCommand::new(directory)))
            .with_description("Lookup linked Roblox account")
            .with_option(OptionSpec::required("discord_id", "Discord user ID")))
        .with(Command::new("groqq", Arc::new(GroqCommand::new(llm.clone())))
            .with_description("Ask AI a question")
            .with_option(OptionSpec::required("prompt", "Your prompt")))
        .with(Command::new("customai", Arc::new(CustomAiCommand::new(llm)))
            .with_description("Custom AI response")
            .with_option(OptionSpec::required("system_prompt", "System prompt for context"))
            .with_option(OptionSpec::optional("message", "Initial message (optional)")))
        .with(Command::from_fn("ping", |_| Ok("Pong!".to_string()))
            .with_description("Test response"))
        .with(Command::from_fn("help", |_| Ok(HELP_TEXT.to_string()))
            .with_description("Show help menu"))
}

/// One entry of the command-registration request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub options: Vec<OptionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub description: String,
    pub required: bool,
}

/// Command schemas in the shape the platform's registration endpoint expects
pub fn registration_manifest(registry: &CommandRegistry) -> Vec<CommandDefinition> {
    registry
        .all()
        .map(|cmd| CommandDefinition {
            name: cmd.name.clone(),
            description: cmd.description.clone().unwrap_or_else(|| cmd.name.clone()),
            options: cmd
                .options
                .iter()
                .map(|opt| OptionDefinition {
                    name: opt.name.clone(),
                    kind: OPTION_TYPE_STRING,
                    description: opt.description.clone(),
                    required: opt.required,
                })
                .collect(),
        })
        .collect()
}
