//! Interaction parser - Classifies verified payloads into typed interactions

use serde::Deserialize;
use serde_json::Value;

use super::verifier::VerifiedPayload;
use crate::application::errors::ParseError;
use crate::domain::entities::{CommandOption, Interaction};

/// Interaction type of the endpoint liveness probe
pub const INTERACTION_PING: i64 = 1;
/// Interaction type of a slash command invocation
pub const INTERACTION_APPLICATION_COMMAND: i64 = 2;

#[derive(Deserialize)]
struct RawInteraction {
    #[serde(rename = "type")]
    kind: i64,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Deserialize)]
struct RawCommandData {
    name: String,
    #[serde(default)]
    options: Vec<RawOption>,
}

#[derive(Deserialize)]
struct RawOption {
    name: String,
    #[serde(default)]
    value: Option<Value>,
    /// Present on sub-command and sub-command-group options
    #[serde(default)]
    options: Vec<RawOption>,
}

/// Parses verified payloads into [`Interaction`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct InteractionParser;

impl InteractionParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, payload: &VerifiedPayload) -> Result<Interaction, ParseError> {
        let raw: RawInteraction = serde_json::from_slice(payload.bytes())
            .map_err(|e| ParseError::Malformed(e.to_string()))?;

        match raw.kind {
            INTERACTION_PING => Ok(Interaction::Handshake),
            INTERACTION_APPLICATION_COMMAND => self.parse_command(raw.data),
            other => Err(ParseError::UnknownType(other)),
        }
    }

    /// Parse the `data` object of a command invocation
    fn parse_command(&self, data: Option<Value>) -> Result<Interaction, ParseError> {
        let data = data.ok_or_else(|| ParseError::Malformed("command interaction without data".to_string()))?;
        let data: RawCommandData = serde_json::from_value(data)
            .map_err(|e| ParseError::Malformed(e.to_string()))?;

        let mut options = Vec::new();
        flatten_options(data.options, &mut options);

        Ok(Interaction::CommandInvocation {
            name: data.name.to_lowercase(),
            options,
        })
    }
}

/// Depth-first, order-preserving flattening; options without a value are dropped
fn flatten_options(raw: Vec<RawOption>, out: &mut Vec<CommandOption>) {
    for option in raw {
        match option.value {
            Some(Value::Null) | None => {}
            Some(Value::String(s)) => out.push(CommandOption::new(option.name, s)),
            Some(other) => out.push(CommandOption::new(option.name, other.to_string())),
        }
        flatten_options(option.options, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::interactions::verifier::{RawRequest, SignatureVerifier};
    use ed25519_dalek::{Signer, SigningKey};
    use serde_json::json;

    /// Sign and verify a body so the parser only ever sees verified bytes
    fn verified(body: Value) -> VerifiedPayload {
        let key = SigningKey::from_bytes(&[3; 32]);
        let body = serde_json::to_vec(&body).unwrap();
        let mut message = b"1".to_vec();
        message.extend_from_slice(&body);
        let signature = hex::encode(key.sign(&message).to_bytes());

        let verifier = SignatureVerifier::new(key.verifying_key());
        verifier
            .verify(RawRequest::new(body, Some(signature), Some("1".to_string())))
            .expect("signed payload verifies")
    }

    #[test]
    fn test_ping_is_handshake() {
        let parser = InteractionParser::new();
        assert_eq!(parser.parse(&verified(json!({"type": 1}))), Ok(Interaction::Handshake));
    }

    #[test]
    fn test_command_name_is_lowercased() {
        let parser = InteractionParser::new();
        let interaction = parser
            .parse(&verified(json!({"type": 2, "data": {"name": "GroqQ"}})))
            .unwrap();

        assert_eq!(
            interaction,
            Interaction::CommandInvocation { name: "groqq".to_string(), options: vec![] }
        );
    }

    #[test]
    fn test_options_are_flattened_in_order() {
        let parser = InteractionParser::new();
        let interaction = parser
            .parse(&verified(json!({
                "type": 2,
                "data": {
                    "name": "customai",
                    "options": [
                        {"name": "system_prompt", "type": 3, "value": "be brief"},
                        {"name": "group", "type": 2, "options": [
                            {"name": "count", "type": 4, "value": 3},
                            {"name": "loud", "type": 5, "value": true}
                        ]},
                        {"name": "message", "type": 3, "value": null}
                    ]
                }
            })))
            .unwrap();

        assert_eq!(
            interaction,
            Interaction::CommandInvocation {
                name: "customai".to_string(),
                options: vec![
                    CommandOption::new("system_prompt", "be brief"),
                    CommandOption::new("count", "3"),
                    CommandOption::new("loud", "true"),
                ],
            }
        );
    }

    #[test]
    fn test_unknown_type() {
        let parser = InteractionParser::new();
        assert_eq!(
            parser.parse(&verified(json!({"type": 3, "data": {"custom_id": "x"}}))),
            Err(ParseError::UnknownType(3))
        );
    }

    #[test]
    fn test_malformed_payloads() {
        let parser = InteractionParser::new();

        for body in [
            json!({"id": "no type"}),
            json!({"type": "1"}),
            json!({"type": 2}),
            json!({"type": 2, "data": {"options": []}}),
            json!("ping"),
            json!(null),
        ] {
            assert!(
                matches!(parser.parse(&verified(body.clone())), Err(ParseError::Malformed(_))),
                "expected malformed: {body}"
            );
        }
    }
}
