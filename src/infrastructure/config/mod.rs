//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::application::interactions::SignatureVerifier;
use crate::infrastructure::llm::LLMConfig;
use crate::infrastructure::roblox::{USERS_API_BASE, VERIFY_API_BASE};

/// Bot configuration, read once at startup
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub discord: DiscordConfig,
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub roblox: RobloxConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Upper bound on a single command handler run
    pub command_deadline_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiscordConfig {
    pub application_id: Option<String>,
    /// Hex-encoded Ed25519 application public key
    pub public_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    pub bind_address: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RobloxConfig {
    pub verify_base_url: String,
    pub users_base_url: String,
    /// Per-request timeout for each lookup call
    pub timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "interaction-bot".to_string(),
            command_deadline_secs: 12,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl Default for RobloxConfig {
    fn default() -> Self {
        Self {
            verify_base_url: VERIFY_API_BASE.to_string(),
            users_base_url: USERS_API_BASE.to_string(),
            timeout_secs: 5,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(id) = lookup("DISCORD_APPLICATION_ID") {
            self.discord.application_id = Some(id);
        }
        if let Some(key) = lookup("DISCORD_PUBLIC_KEY") {
            self.discord.public_key = Some(key);
        }
        if let Some(bind) = lookup("BIND_ADDRESS") {
            self.server.bind_address = bind;
        }

        self.llm.apply_env(lookup);
    }

    /// Build the request verifier from the configured public key
    pub fn verifier(&self) -> Result<SignatureVerifier, ConfigError> {
        let key = self.discord.public_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField("discord.public-key".to_string()))?;
        SignatureVerifier::from_hex(key)
    }

    /// Check everything the webhook needs before it starts listening
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.verifier()?;
        if self.bot.command_deadline_secs == 0 {
            return Err(ConfigError::InvalidValue("bot.command-deadline-secs must be positive".to_string()));
        }
        if self.roblox.timeout_secs == 0 || self.llm.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("timeouts must be positive".to_string()));
        }
        Ok(())
    }
}
