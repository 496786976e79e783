use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::domain::entities::{CommandContext, CommandHandler};
use crate::infrastructure::llm::{LLMMessage, LLM};

pub const CUSTOMAI_INSTRUCTIONS: &str = "Custom AI chat initialized. Provide a 'message' option in your next /customai call to interact. Note: Each call is stateless; include previous context in the system prompt if needed for multi-turn conversations.";

/// `/groqq prompt:<text>` - one-off question to the completion service
pub struct GroqCommand {
    llm: Arc<dyn LLM>,
}

impl GroqCommand {
    pub fn new(llm: Arc<dyn LLM>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CommandHandler for GroqCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<String, CommandError> {
        let prompt = ctx.required("prompt")?;
        let response = self.llm.chat(vec![LLMMessage::user(prompt)], None, None, None).await?;

        tracing::debug!(
            interaction_id = %ctx.interaction_id,
            provider = self.llm.name(),
            model = %response.model,
            "completion received"
        );
        Ok(response.content)
    }
}

/// `/customai system_prompt:<text> [message:<text>]`
///
/// Every call stands alone; nothing from earlier calls is remembered.
pub struct CustomAiCommand {
    llm: Arc<dyn LLM>,
}

impl CustomAiCommand {
    pub fn new(llm: Arc<dyn LLM>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CommandHandler for CustomAiCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<String, CommandError> {
        let system_prompt = ctx.required("system_prompt")?;
        let Some(message) = ctx.option("message").filter(|m| !m.is_empty()) else {
            return Ok(CUSTOMAI_INSTRUCTIONS.to_string());
        };

        let messages = vec![LLMMessage::system(system_prompt), LLMMessage::user(message)];
        let response = self.llm.chat(messages, None, None, None).await?;
        Ok(response.content)
    }
}
