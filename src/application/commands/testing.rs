//! In-memory adapters that count their calls

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::errors::LookupError;
use crate::domain::traits::{AccountDirectory, LinkLookup, RobloxProfile};
use crate::infrastructure::llm::{LLMError, LLMMessage, LLMResponse, LLMResult, LLM};

pub struct FakeDirectory {
    link: Result<LinkLookup, LookupError>,
    profile_name: Result<String, LookupError>,
    delay: Option<Duration>,
    link_calls: AtomicUsize,
    profile_calls: AtomicUsize,
}

impl FakeDirectory {
    pub fn linked(roblox_id: &str, name: &str) -> Self {
        Self::new(Ok(LinkLookup::Linked(roblox_id.to_string())), Ok(name.to_string()))
    }

    pub fn not_linked() -> Self {
        Self::new(Ok(LinkLookup::NotLinked), Ok("unused".to_string()))
    }

    pub fn failing(err: LookupError) -> Self {
        Self::new(Err(err), Ok("unused".to_string()))
    }

    pub fn new(link: Result<LinkLookup, LookupError>, profile_name: Result<String, LookupError>) -> Self {
        Self {
            link,
            profile_name,
            delay: None,
            link_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn link_calls(&self) -> usize {
        self.link_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.link_calls() + self.profile_calls()
    }
}

#[async_trait]
impl AccountDirectory for FakeDirectory {
    async fn linked_account(&self, _discord_id: &str) -> Result<LinkLookup, LookupError> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.link.clone()
    }

    async fn profile(&self, roblox_id: &str) -> Result<RobloxProfile, LookupError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile_name.clone().map(|name| RobloxProfile {
            id: roblox_id.to_string(),
            name,
        })
    }
}

pub struct FakeLLM {
    reply: LLMResult<String>,
    requests: Mutex<Vec<Vec<LLMMessage>>>,
}

impl FakeLLM {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: LLMError) -> Self {
        Self {
            reply: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<Vec<LLMMessage>> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LLM for FakeLLM {
    fn name(&self) -> &str {
        "fake"
    }

    async fn chat(
        &self,
        messages: Vec<LLMMessage>,
        model: Option<&str>,
        _temperature: Option<f32>,
        _max_tokens: Option<u32>,
    ) -> LLMResult<LLMResponse> {
        self.requests.lock().unwrap().push(messages);
        self.reply.clone().map(|content| LLMResponse {
            content,
            model: model.unwrap_or("fake-model").to_string(),
            finish_reason: Some("stop".to_string()),
        })
    }
}
