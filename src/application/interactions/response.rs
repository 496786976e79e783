//! Response formatter - Wraps results in the platform's reply envelope

use serde::Serialize;

use crate::domain::entities::CommandResult;

/// Response type acknowledging a ping
pub const RESPONSE_PONG: u8 = 1;
/// Response type carrying a channel message
pub const RESPONSE_CHANNEL_MESSAGE: u8 = 4;
/// Message flag: only the invoking user sees the reply
pub const FLAG_EPHEMERAL: u64 = 1 << 6;

/// Platform limit on message content, in characters
pub const MAX_CONTENT_CHARS: usize = 2000;
const TRUNCATION_MARKER: &str = "...";
const EMPTY_CONTENT: &str = "(empty response)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseData {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: RESPONSE_PONG,
            data: None,
        }
    }

    pub fn message(result: CommandResult) -> Self {
        Self {
            kind: RESPONSE_CHANNEL_MESSAGE,
            data: Some(ResponseData {
                content: fit_content(result.content),
                flags: result.ephemeral.then_some(FLAG_EPHEMERAL),
            }),
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.content.as_str())
    }
}

impl From<CommandResult> for InteractionResponse {
    fn from(result: CommandResult) -> Self {
        Self::message(result)
    }
}

/// Keep content within what the platform accepts
fn fit_content(content: String) -> String {
    if content.trim().is_empty() {
        return EMPTY_CONTENT.to_string();
    }
    if content.chars().count() <= MAX_CONTENT_CHARS {
        return content;
    }
    let keep = MAX_CONTENT_CHARS - TRUNCATION_MARKER.len();
    let mut truncated: String = content.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
