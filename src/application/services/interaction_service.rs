use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::application::commands::default_registry;
use crate::application::errors::{ConfigError, InteractionError};
use crate::application::interactions::{
    CommandDispatcher, InteractionParser, InteractionResponse, RawRequest, SignatureVerifier,
};
use crate::domain::entities::{CommandContext, Interaction};
use crate::infrastructure::config::Config;
use crate::infrastructure::llm::GroqProvider;
use crate::infrastructure::roblox::RobloxClient;

/// Hosting-independent interaction core: raw request in, reply envelope out.
///
/// Holds no mutable state, so one instance serves every request concurrently.
pub struct InteractionService {
    verifier: SignatureVerifier,
    parser: InteractionParser,
    dispatcher: CommandDispatcher,
}

impl InteractionService {
    pub fn new(verifier: SignatureVerifier, dispatcher: CommandDispatcher) -> Self {
        Self {
            verifier,
            parser: InteractionParser::new(),
            dispatcher,
        }
    }

    /// Wire the production adapters from configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let directory = RobloxClient::with_base_urls(
            &config.roblox.verify_base_url,
            &config.roblox.users_base_url,
            Duration::from_secs(config.roblox.timeout_secs),
        )?;
        let llm = GroqProvider::from_config(&config.llm);
        if config.llm.api_key().is_none() {
            tracing::warn!("GROQ_API_KEY not set, completion commands will reply with an error");
        }

        let registry = default_registry(Arc::new(directory), Arc::new(llm));
        let dispatcher = CommandDispatcher::new(registry)
            .with_deadline(Duration::from_secs(config.bot.command_deadline_secs));

        Ok(Self::new(config.verifier()?, dispatcher))
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Verify, classify, and answer one request.
    ///
    /// Only signature and classification failures are errors; every command
    /// outcome, including handler failures, is a reply.
    pub async fn handle(&self, request: RawRequest) -> Result<InteractionResponse, InteractionError> {
        let interaction_id = Uuid::new_v4();

        let Some(payload) = self.verifier.verify(request) else {
            tracing::warn!(%interaction_id, "rejected request with invalid signature");
            return Err(InteractionError::Unauthorized);
        };

        let interaction = self.parser.parse(&payload).map_err(|err| {
            tracing::warn!(%interaction_id, error = %err, "rejected interaction");
            InteractionError::from(err)
        })?;

        tracing::debug!(%interaction_id, kind = interaction.as_str(), "interaction verified");

        match interaction {
            Interaction::Handshake => Ok(InteractionResponse::pong()),
            Interaction::CommandInvocation { name, options } => {
                let ctx = CommandContext::new(interaction_id, name, options);
                let result = self.dispatcher.dispatch(ctx).await;
                Ok(InteractionResponse::message(result))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::testing::{FakeDirectory, FakeLLM};
    use crate::application::commands::{CUSTOMAI_INSTRUCTIONS, NO_LINKED_ACCOUNT};
    use crate::application::errors::LookupError;
    use ed25519_dalek::{Signer, SigningKey};
    use serde_json::{json, Value};

    const TIMESTAMP: &str = "1700000000";

    struct Harness {
        key: SigningKey,
        directory: Arc<FakeDirectory>,
        llm: Arc<FakeLLM>,
        service: InteractionService,
    }

    impl Harness {
        fn new(directory: FakeDirectory, llm: FakeLLM) -> Self {
            let key = SigningKey::from_bytes(&[11; 32]);
            let directory = Arc::new(directory);
            let llm = Arc::new(llm);
            let dispatcher = CommandDispatcher::new(default_registry(directory.clone(), llm.clone()))
                .with_deadline(Duration::from_millis(200));
            let service = InteractionService::new(SignatureVerifier::new(key.verifying_key()), dispatcher);
            Self { key, directory, llm, service }
        }

        fn signed(&self, body: &Value) -> RawRequest {
            let body = serde_json::to_vec(body).unwrap();
            let mut message = TIMESTAMP.as_bytes().to_vec();
            message.extend_from_slice(&body);
            let signature = hex::encode(self.key.sign(&message).to_bytes());
            RawRequest::new(body, Some(signature), Some(TIMESTAMP.to_string()))
        }

        async fn reply(&self, body: Value) -> Value {
            let response = self.service.handle(self.signed(&body)).await.expect("reply");
            serde_json::to_value(response).unwrap()
        }
    }

    fn command(name: &str, options: Value) -> Value {
        json!({"type": 2, "id": "1", "data": {"name": name, "options": options}})
    }

    fn ephemeral(content: &str) -> Value {
        json!({"type": 4, "data": {"content": content, "flags": 64}})
    }

    #[tokio::test]
    async fn test_handshake_never_dispatches() {
        let h = Harness::new(FakeDirectory::not_linked(), FakeLLM::replying("x"));

        assert_eq!(h.reply(json!({"type": 1})).await, json!({"type": 1}));
        assert_eq!(h.directory.total_calls(), 0);
        assert_eq!(h.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_signature_is_unauthorized() {
        let h = Harness::new(FakeDirectory::not_linked(), FakeLLM::replying("x"));

        let mut request = h.signed(&command("ping", json!([])));
        request.body = br#"{"type":2,"data":{"name":"groqq"}}"#.to_vec();
        assert_eq!(h.service.handle(request).await, Err(InteractionError::Unauthorized));

        let mut request = h.signed(&json!({"type": 1}));
        request.signature = None;
        assert_eq!(h.service.handle(request).await, Err(InteractionError::Unauthorized));
    }

    #[tokio::test]
    async fn test_unknown_interaction_type() {
        let h = Harness::new(FakeDirectory::not_linked(), FakeLLM::replying("x"));

        let err = h.service.handle(h.signed(&json!({"type": 5}))).await.unwrap_err();
        assert_eq!(err, InteractionError::UnknownInteractionType(5));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let h = Harness::new(FakeDirectory::not_linked(), FakeLLM::replying("x"));
        assert_eq!(h.reply(command("dance", json!([]))).await, ephemeral("Unknown command."));
    }

    #[tokio::test]
    async fn test_ping_and_mixed_case_names() {
        let h = Harness::new(FakeDirectory::not_linked(), FakeLLM::replying("x"));

        assert_eq!(h.reply(command("ping", json!([]))).await, ephemeral("Pong!"));
        assert_eq!(h.reply(command("PiNg", json!([]))).await, ephemeral("Pong!"));
        assert_eq!(h.directory.total_calls() + h.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_groqq_scenario() {
        let h = Harness::new(FakeDirectory::not_linked(), FakeLLM::replying("hi there"));

        let reply = h.reply(command("groqq", json!([{"name": "prompt", "type": 3, "value": "hello"}]))).await;
        assert_eq!(reply, ephemeral("hi there"));
    }

    #[tokio::test]
    async fn test_customai_without_message() {
        let h = Harness::new(FakeDirectory::not_linked(), FakeLLM::replying("x"));

        let reply = h.reply(command("customai", json!([{"name": "system_prompt", "type": 3, "value": "be terse"}]))).await;
        assert_eq!(reply, ephemeral(CUSTOMAI_INSTRUCTIONS));
        assert_eq!(h.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_roblox_not_linked() {
        let h = Harness::new(FakeDirectory::not_linked(), FakeLLM::replying("x"));

        let reply = h.reply(command("roblox", json!([{"name": "discord_id", "type": 3, "value": "123"}]))).await;
        assert_eq!(reply, ephemeral(NO_LINKED_ACCOUNT));
        assert_eq!(h.directory.profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_option_is_error_reply() {
        let h = Harness::new(FakeDirectory::not_linked(), FakeLLM::replying("x"));

        let reply = h.reply(command("groqq", json!([]))).await;
        assert_eq!(reply, ephemeral("Error: missing required option: prompt"));
    }

    #[tokio::test]
    async fn test_lookup_timeout_then_keeps_serving() {
        let h = Harness::new(
            FakeDirectory::failing(LookupError::Timeout { service: "verify.eryn.io" }),
            FakeLLM::replying("x"),
        );

        let reply = h.reply(command("roblox", json!([{"name": "discord_id", "type": 3, "value": "123"}]))).await;
        assert_eq!(reply, ephemeral("Error: verify.eryn.io request timed out"));

        assert_eq!(h.reply(command("ping", json!([]))).await, ephemeral("Pong!"));
    }

    #[tokio::test]
    async fn test_slow_lookup_hits_deadline() {
        let h = Harness::new(
            FakeDirectory::not_linked().with_delay(Duration::from_secs(5)),
            FakeLLM::replying("x"),
        );

        let reply = h.reply(command("roblox", json!([{"name": "discord_id", "type": 3, "value": "123"}]))).await;
        assert_eq!(reply, ephemeral("Error: command timed out after 200ms"));
    }
}
