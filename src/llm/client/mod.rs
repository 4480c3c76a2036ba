//! Chat-completion client for report section generation.
//!
//! Speaks the OpenAI chat-completions wire format, so any compatible
//! provider works by pointing `endpoint` at it.

mod config;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use config::LlmConfig;

/// Chat-completion client.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl LlmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Get the config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generate text for `user_prompt` using the configured system prompt.
    pub async fn generate(&self, user_prompt: &str) -> Result<String, LlmError> {
        self.complete(self.config.get_system_prompt(), user_prompt)
            .await
    }

    /// Send a system + user message pair and return the first choice verbatim.
    ///
    /// A `null` message content yields an empty string.
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut builder = self.client.post(self.config.completions_url()).json(&request);
        if let Some(key) = self.config.api_key.as_deref() {
            builder = builder.bearer_auth(key);
        }

        debug!(
            "Requesting completion from {} (model {}, {} prompt chars)",
            self.config.endpoint,
            self.config.model,
            user_prompt.len()
        );
        let resp = builder
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

/// Errors that can occur during completion requests.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failed to reach the completion service
    #[error("Connection error: {0}")]
    Connection(String),
    /// API returned an error status
    #[error("API error: {0}")]
    Api(String),
    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
    /// Response contained no choices
    #[error("Completion response contained no choices")]
    EmptyResponse,
}
