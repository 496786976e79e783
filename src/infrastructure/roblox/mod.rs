//! Roblox account lookup - account linkage (verify.eryn.io) and public profiles

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::application::errors::{ConfigError, LookupError};
use crate::domain::traits::{AccountDirectory, LinkLookup, RobloxProfile};

/// Account-linkage service base URL
pub const VERIFY_API_BASE: &str = "https://verify.eryn.io";
/// Roblox users API base URL
pub const USERS_API_BASE: &str = "https://users.roblox.com";

const VERIFY_SERVICE: &str = "verify.eryn.io";
const USERS_SERVICE: &str = "users.roblox.com";

/// Account-linkage response
#[derive(Debug, Deserialize)]
struct LinkResponse {
    status: Option<String>,
    #[serde(rename = "robloxId")]
    roblox_id: Option<serde_json::Value>,
}

impl LinkResponse {
    fn into_lookup(self) -> LinkLookup {
        if self.status.as_deref() != Some("ok") {
            return LinkLookup::NotLinked;
        }
        let id = match self.roblox_id {
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        };
        id.map(LinkLookup::Linked).unwrap_or(LinkLookup::NotLinked)
    }
}

/// Roblox users API response (only the fields we read)
#[derive(Debug, Deserialize)]
struct UserResponse {
    name: String,
}

/// HTTP client for both lookup services
pub struct RobloxClient {
    client: Client,
    verify_base: Url,
    users_base: Url,
    timeout: Duration,
}

impl RobloxClient {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        Self::with_base_urls(VERIFY_API_BASE, USERS_API_BASE, timeout)
    }

    pub fn with_base_urls(verify_base: &str, users_base: &str, timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self {
            client: Client::new(),
            verify_base: parse_base(verify_base)?,
            users_base: parse_base(users_base)?,
            timeout,
        })
    }

    async fn get(&self, service: &'static str, url: Url) -> Result<(reqwest::StatusCode, String), LookupError> {
        tracing::debug!(service, path = url.path(), "lookup request");

        let response = self.client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(service, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(service, e))?;
        Ok((status, body))
    }
}

fn parse_base(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidValue(format!("invalid base URL {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue(format!("URL cannot be used as a base: {}", raw)));
    }
    Ok(url)
}

/// Appends percent-encoded path segments to a base URL
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn transport_error(service: &'static str, err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout { service }
    } else {
        LookupError::Network { service, message: err.to_string() }
    }
}

#[async_trait]
impl AccountDirectory for RobloxClient {
    async fn linked_account(&self, discord_id: &str) -> Result<LinkLookup, LookupError> {
        let url = endpoint(&self.verify_base, &["api", "user", discord_id]);
        let (status, body) = self.get(VERIFY_SERVICE, url).await?;

        // The service answers unlinked users with an error status and a JSON
        // body that still carries `status`.
        match serde_json::from_str::<LinkResponse>(&body) {
            Ok(link) if status.is_success() || link.status.is_some() => Ok(link.into_lookup()),
            Ok(_) => Err(LookupError::Status { service: VERIFY_SERVICE, status: status.as_u16() }),
            Err(_) if !status.is_success() => {
                Err(LookupError::Status { service: VERIFY_SERVICE, status: status.as_u16() })
            }
            Err(e) => Err(LookupError::Parse { service: VERIFY_SERVICE, message: e.to_string() }),
        }
    }

    async fn profile(&self, roblox_id: &str) -> Result<RobloxProfile, LookupError> {
        let url = endpoint(&self.users_base, &["v1", "users", roblox_id]);
        let (status, body) = self.get(USERS_SERVICE, url).await?;

        if !status.is_success() {
            return Err(LookupError::Status { service: USERS_SERVICE, status: status.as_u16() });
        }

        let user: UserResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::Parse { service: USERS_SERVICE, message: e.to_string() })?;

        Ok(RobloxProfile {
            id: roblox_id.to_string(),
            name: user.name,
        })
    }
}
