use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::CommandOption;
use crate::application::errors::CommandError;

/// Declared option of a command, published when the command is registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl OptionSpec {
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }
}

/// Everything a handler gets to see about one invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub interaction_id: Uuid,
    pub command: String,
    pub options: Vec<CommandOption>,
}

impl CommandContext {
    pub fn new(interaction_id: Uuid, command: impl Into<String>, options: Vec<CommandOption>) -> Self {
        Self {
            interaction_id,
            command: command.into(),
            options,
        }
    }

    /// First option with the given name
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }

    pub fn required(&self, name: &str) -> Result<&str, CommandError> {
        self.option(name)
            .ok_or_else(|| CommandError::MissingOption(name.to_string()))
    }
}

/// Command handler
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: CommandContext) -> Result<String, CommandError>;
}

/// Adapts a synchronous closure into a [`CommandHandler`]
struct FnHandler<F>(F);

#[async_trait]
impl<F> CommandHandler for FnHandler<F>
where
    F: Fn(&CommandContext) -> Result<String, CommandError> + Send + Sync,
{
    async fn handle(&self, ctx: CommandContext) -> Result<String, CommandError> {
        (self.0)(&ctx)
    }
}

/// Represents a slash command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub options: Vec<OptionSpec>,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            description: None,
            options: Vec::new(),
            handler,
        }
    }

    /// Command answered by a synchronous closure
    pub fn from_fn<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&CommandContext) -> Result<String, CommandError> + Send + Sync + 'static,
    {
        Self::new(name, Arc::new(FnHandler(handler)))
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        self.name == input.to_lowercase()
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .finish()
    }
}

/// Command registry, built once at startup and read-only afterwards
#[derive(Default, Debug)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, replacing any earlier one with the same name
    pub fn register(&mut self, command: Command) {
        self.commands.retain(|c| c.name != command.name);
        self.commands.push(command);
    }

    pub fn with(mut self, command: Command) -> Self {
        self.register(command);
        self
    }

    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(input))
    }

    /// Commands in registration order
    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
