//! Chat-completion client configuration.

use serde::{Deserialize, Serialize};

use crate::report::SYSTEM_PROMPT;

/// Configuration for the chat-completion client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API base URL; `/v1/chat/completions` is appended
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key (normally supplied via OPENAI_API_KEY)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model to use for section generation
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Custom system prompt; the built-in forensic engineer prompt is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "chatgpt-4o-latest".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.5
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `OPENAI_API_KEY` / `LLM_API_KEY`: API key (`LLM_API_KEY` wins)
    /// - `LLM_ENDPOINT`: API base URL
    /// - `LLM_MODEL`: Model name
    /// - `LLM_MAX_TOKENS`: Maximum tokens in response
    /// - `LLM_TEMPERATURE`: Sampling temperature
    /// - `LLM_SYSTEM_PROMPT`: Custom system prompt
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            self.api_key = Some(key);
        }
        if let Ok(val) = std::env::var("LLM_ENDPOINT") {
            self.endpoint = val;
        }
        if let Ok(val) = std::env::var("LLM_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("LLM_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                self.max_tokens = n;
            }
        }
        if let Ok(val) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                self.temperature = t;
            }
        }
        if let Ok(val) = std::env::var("LLM_SYSTEM_PROMPT") {
            self.system_prompt = Some(val);
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Get the system prompt, using custom or default.
    pub fn get_system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(SYSTEM_PROMPT)
    }

    /// True when an API key is present and non-blank.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "chatgpt-4o-latest");
        assert_eq!(config.max_tokens, 1000);
        assert!((config.temperature - 0.5).abs() < f32::EPSILON);
        assert!(!config.has_api_key());
        assert!(config.get_system_prompt().contains("expert forensic engineer"));
    }

    #[test]
    fn test_completions_url() {
        let config = LlmConfig::default().with_endpoint("http://127.0.0.1:9000/");
        assert_eq!(
            config.completions_url(),
            "http://127.0.0.1:9000/v1/chat/completions"
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: LlmConfig = toml::from_str("model = \"gpt-4o\"\ntemperature = 0.7").unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.endpoint, "https://api.openai.com");
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = LlmConfig::default().with_api_key("sk-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
