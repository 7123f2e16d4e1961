#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Settings;

pub const DEFAULT_TONE: &str = "friendly";

/// Body of a `POST /chat` request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub tone: String,
    pub temperature: f64,
    pub persona: String,
}

impl ChatRequest {
    pub fn new(message: &str, persona: &str, settings: &Settings) -> ChatRequest {
        return ChatRequest {
            message: message.to_string(),
            tone: DEFAULT_TONE.to_string(),
            temperature: settings.temperature,
            persona: persona.to_string(),
        };
    }
}

/// Body of a successful `POST /chat` response. Only `response` is part of the
/// contract, the remaining fields are informational.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the chat API is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Sends a single chat request. Any non-success status is returned as an
    /// error, as are transport failures. No retries are attempted.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
