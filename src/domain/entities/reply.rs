use std::fmt;

/// Reply for an unregistered command
pub const UNKNOWN_COMMAND: &str = "Unknown command.";

/// Outcome of exactly one command handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub content: String,
    /// Visible only to the invoking user
    pub ephemeral: bool,
}

impl CommandResult {
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }

    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    pub fn unknown_command() -> Self {
        Self::ephemeral(UNKNOWN_COMMAND)
    }

    /// Failure reply shown to the user as `Error: <message>`
    pub fn error(message: impl fmt::Display) -> Self {
        Self::ephemeral(format!("Error: {}", message))
    }
}
