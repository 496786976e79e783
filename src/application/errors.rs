//! Application layer errors

use thiserror::Error;

use crate::infrastructure::llm::LLMError;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Command execution errors
///
/// The `Display` output of these errors is what the user sees after
/// `Error: ` in the reply, so messages stay short and free of secrets.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("missing required option: {0}")]
    MissingOption(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Completion(#[from] LLMError),
}

/// Errors raised by the account lookup adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{service} request timed out")]
    Timeout { service: &'static str },

    #[error("{service} request failed: {message}")]
    Network { service: &'static str, message: String },

    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("invalid response from {service}: {message}")]
    Parse { service: &'static str, message: String },
}

/// Interaction payload classification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown interaction type: {0}")]
    UnknownType(i64),

    #[error("invalid interaction payload: {0}")]
    Malformed(String),
}

/// Request-level failures; the only outcomes that do not produce a reply envelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("invalid request signature")]
    Unauthorized,

    #[error("unknown interaction type: {0}")]
    UnknownInteractionType(i64),

    #[error("invalid interaction payload: {0}")]
    MalformedPayload(String),
}

impl From<ParseError> for InteractionError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnknownType(kind) => InteractionError::UnknownInteractionType(kind),
            ParseError::Malformed(msg) => InteractionError::MalformedPayload(msg),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
