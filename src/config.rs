//! Configuration management using the prefer crate for file discovery.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. A config file (`--config PATH`, or discovered by prefer as `forensic-report.*`)
//! 3. Environment variables (see `LlmConfig` and `WeatherConfig`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::LlmConfig;
use crate::weather::WeatherConfig;

/// Name used for config file discovery.
pub const CONFIG_NAME: &str = "forensic-report";

/// Default address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8888";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    #[error("{0} is not set")]
    MissingSecret(&'static str),
}

/// Application configuration passed explicitly into the server and CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address for `serve` when `--bind` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Chat-completion API settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Historical weather API settings.
    #[serde(default)]
    pub weather: WeatherConfig,
    /// File this config was loaded from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Discover a config file with prefer, falling back to defaults.
    pub async fn load() -> Self {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports TOML, YAML and JSON based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config text in the format implied by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, ConfigError> {
        match ext {
            "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "YAML",
                message: e.to_string(),
            }),
            _ => serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            }),
        }
    }

    /// Apply environment variable overrides to every section.
    pub fn with_env_overrides(mut self) -> Self {
        self.llm = self.llm.with_env_overrides();
        self.weather = self.weather.with_env_overrides();
        if let Some(bind) = std::env::var("BIND_ADDRESS").ok().filter(|s| !s.is_empty()) {
            self.bind = Some(bind);
        }
        self
    }

    /// Both API keys are required before serving requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.llm.has_api_key() {
            return Err(ConfigError::MissingSecret("OPENAI_API_KEY"));
        }
        if !self.weather.has_api_key() {
            return Err(ConfigError::MissingSecret("WEATHER_API_KEY"));
        }
        Ok(())
    }

    /// Bind address from config, or the default.
    pub fn bind_address(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }
}

/// Load config from an explicit path or by discovery, then apply env overrides.
pub async fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    if let Some(ref source) = config.source_path {
        tracing::debug!("Loaded config from {}", source.display());
    }

    Ok(config.with_env_overrides())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(ext: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{}", ext))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_toml() {
        let file = write_config(
            "toml",
            r#"
bind = "0.0.0.0:9000"

[llm]
model = "gpt-4o"
temperature = 0.7

[weather]
endpoint = "https://weather.internal/v1"
"#,
        );

        let config = Config::load_from_path(file.path()).await.unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.max_tokens, 1000);
        assert_eq!(config.weather.endpoint, "https://weather.internal/v1");
        assert_eq!(config.source_path.as_deref(), Some(file.path()));
    }

    #[tokio::test]
    async fn test_load_yaml() {
        let file = write_config("yaml", "llm:\n  max_tokens: 1500\n");
        let config = Config::load_from_path(file.path()).await.unwrap();
        assert_eq!(config.llm.max_tokens, 1500);
        assert_eq!(config.bind_address(), DEFAULT_BIND);
    }

    #[tokio::test]
    async fn test_load_json_with_keys() {
        let file = write_config(
            "json",
            r#"{"llm": {"api_key": "sk-file"}, "weather": {"api_key": "wx-file"}}"#,
        );
        let config = Config::load_from_path(file.path()).await.unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-file"));
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_reports_parse_errors() {
        let file = write_config("toml", "llm = [not valid");
        let err = Config::load_from_path(file.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "TOML", .. }));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = Config::load_from_path(Path::new("/nonexistent/forensic-report.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_validate_requires_both_keys() {
        let mut config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingSecret("OPENAI_API_KEY"))
        ));

        config.llm = config.llm.with_api_key("sk-test");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingSecret("WEATHER_API_KEY"))
        ));

        config.weather = config.weather.with_api_key("   ");
        assert!(config.validate().is_err());

        config.weather = config.weather.with_api_key("wx-test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialized_config_omits_secrets() {
        let mut config = Config::default();
        config.llm = config.llm.with_api_key("sk-secret");
        config.weather = config.weather.with_api_key("wx-secret");
        config.bind = Some("0.0.0.0:8888".to_string());

        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("chatgpt-4o-latest"));
        assert!(!rendered.contains("sk-secret"));
        assert!(!rendered.contains("wx-secret"));
    }
}
