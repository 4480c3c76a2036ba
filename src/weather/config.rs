//! Historical weather API configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the historical weather client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL; `/history.json` is appended
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key (normally supplied via WEATHER_API_KEY)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://api.weatherapi.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WeatherConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `WEATHER_API_KEY`: API key
    /// - `WEATHER_API_ENDPOINT`: API base URL
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("WEATHER_API_KEY") {
            self.api_key = Some(key);
        }
        if let Ok(val) = std::env::var("WEATHER_API_ENDPOINT") {
            self.endpoint = val;
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

    /// True when an API key is present and non-blank.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    /// Full URL of the history endpoint.
    pub fn history_url(&self) -> String {
        format!("{}/history.json", self.endpoint.trim_end_matches('/'))
    }
}
