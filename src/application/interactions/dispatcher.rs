//! Command dispatcher - Routes invocations to handlers inside a failure boundary

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinError;

use crate::domain::entities::{CommandContext, CommandRegistry, CommandResult};

/// Default upper bound on one handler run
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(12);

/// Looks up and runs command handlers.
///
/// `dispatch` always yields a [`CommandResult`]: handler errors, panics, and
/// deadline expiry all become an `Error: ...` reply.
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
    deadline: Duration,
}

impl CommandDispatcher {
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, ctx: CommandContext) -> CommandResult {
        let Some(command) = self.registry.find(&ctx.command) else {
            tracing::debug!(interaction_id = %ctx.interaction_id, command = %ctx.command, "unknown command");
            return CommandResult::unknown_command();
        };
        let handler = command.handler.clone();

        let interaction_id = ctx.interaction_id;
        let name = command.name.clone();
        let started = Instant::now();

        // Own task, so a panicking handler cannot take the request down with it
        let task = tokio::spawn(async move { handler.handle(ctx).await });
        let abort = task.abort_handle();

        let result = match tokio::time::timeout(self.deadline, task).await {
            Ok(Ok(Ok(content))) => CommandResult::ephemeral(content),
            Ok(Ok(Err(err))) => {
                tracing::warn!(%interaction_id, command = %name, error = %err, "command failed");
                CommandResult::error(err)
            }
            Ok(Err(join_err)) => {
                let message = fault_message(join_err);
                tracing::error!(%interaction_id, command = %name, error = %message, "command handler fault");
                CommandResult::error(message)
            }
            Err(_) => {
                abort.abort();
                tracing::warn!(
                    %interaction_id,
                    command = %name,
                    deadline_secs = self.deadline.as_secs_f64(),
                    "command deadline exceeded"
                );
                CommandResult::error(format!("command timed out after {:?}", self.deadline))
            }
        };

        tracing::info!(
            %interaction_id,
            command = %name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "command dispatched"
        );
        result
    }
}

fn fault_message(err: JoinError) -> String {
    if !err.is_panic() {
        return "command was cancelled".to_string();
    }
    let panic = err.into_panic();
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "command handler panicked".to_string()
    }
}
