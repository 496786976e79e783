/// A single named option supplied with a command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub value: String,
}

impl CommandOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A verified, classified interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Endpoint liveness probe sent by the platform
    Handshake,
    /// Slash command invocation; `name` is already lower-cased
    CommandInvocation {
        name: String,
        options: Vec<CommandOption>,
    },
}

impl Interaction {
    pub fn as_str(&self) -> &str {
        match self {
            Interaction::Handshake => "handshake",
            Interaction::CommandInvocation { .. } => "command",
        }
    }
}
