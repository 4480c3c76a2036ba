//! Report section generation pipeline.
//!
//! Normalizes the request, optionally enriches it with historical weather,
//! resolves the section prompt and forwards it to the completion API.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::llm::{LlmClient, LlmError};
use crate::report::{build_section_prompt, safe_parse_date, section_skips_weather, ReportContext};
use crate::weather::{WeatherClient, WeatherError, WeatherLookup};

/// Message returned to callers alongside the error details.
pub const GENERATE_FAILED: &str = "Failed to generate report section";

/// A request to generate one report section.
///
/// Fields of the wrong JSON type are treated as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    pub section: Option<String>,
    pub context: Option<Value>,
    pub custom_instructions: Option<Value>,
}

impl GenerateRequest {
    pub fn new(section: &str, context: Value) -> Self {
        Self {
            section: Some(section.to_string()),
            context: Some(context),
            custom_instructions: None,
        }
    }

    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.custom_instructions = Some(Value::String(instructions.to_string()));
        self
    }

    /// Build from a decoded JSON body. Non-object bodies carry no fields.
    pub fn from_value(body: &Value) -> Self {
        Self {
            section: body
                .get("section")
                .and_then(Value::as_str)
                .map(String::from),
            context: body.get("context").filter(|v| !v.is_null()).cloned(),
            custom_instructions: body.get("customInstructions").cloned(),
        }
    }

    /// Parse a raw request body. A JSON `null` body is treated as `{}`.
    pub fn parse(body: impl AsRef<[u8]>) -> Result<Self, ReportError> {
        let value: Value = serde_json::from_slice(body.as_ref())?;
        Ok(Self::from_value(&value))
    }
}

/// Successful generation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateResponse {
    /// Generated section text, verbatim from the model.
    pub section: String,
    #[serde(rename = "sectionName", skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
    #[serde(rename = "weatherData")]
    pub weather_data: Value,
}

/// Failure body returned with a 500.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn from_error(err: &ReportError) -> Self {
        Self {
            error: GENERATE_FAILED.to_string(),
            details: err.to_string(),
        }
    }
}

/// Errors that abort section generation.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("Failed to read request body: {0}")]
    UnreadableBody(String),
    #[error(transparent)]
    Completion(#[from] LlmError),
    #[error("Weather client setup failed: {0}")]
    Weather(#[from] WeatherError),
}

/// Section generation service shared by the HTTP server and the CLI.
#[derive(Debug, Clone)]
pub struct ReportService {
    llm: LlmClient,
    weather: WeatherClient,
}

impl ReportService {
    pub fn new(llm: LlmClient, weather: WeatherClient) -> Self {
        Self { llm, weather }
    }

    /// Build both API clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ReportError> {
        let llm = LlmClient::new(config.llm.clone())?;
        let weather = WeatherClient::new(config.weather.clone())?;
        Ok(Self::new(llm, weather))
    }

    /// Parse a raw JSON body and generate the requested section.
    pub async fn handle_body(&self, body: &[u8]) -> Result<GenerateResponse, ReportError> {
        let request = GenerateRequest::parse(body)?;
        self.generate(request).await
    }

    /// Generate one section.
    ///
    /// Weather failures degrade to an empty `weatherData`; only body and
    /// completion failures are returned as errors.
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ReportError> {
        let section_name = request.section.as_deref();
        let context = request.context.as_ref();

        let weather = if section_skips_weather(section_name) {
            debug!("Section {:?} does not use weather data", section_name);
            WeatherLookup::skipped()
        } else {
            let location = context
                .and_then(|c| c.get("location"))
                .and_then(Value::as_str);
            let date = safe_parse_date(context.and_then(|c| c.get("dateOfLoss")));
            self.weather.lookup(location, date).await
        };
        let weather_data = weather.data_json();

        let normalized = ReportContext::from_value(context);
        let prompt = build_section_prompt(
            section_name,
            &normalized,
            &weather_data,
            request.custom_instructions.as_ref(),
        );

        let text = self.llm.generate(&prompt).await?;
        info!(
            "Generated section {:?} ({} chars, weather {})",
            section_name.unwrap_or_default(),
            text.len(),
            if weather.data.is_some() { "included" } else { "absent" }
        );

        Ok(GenerateResponse {
            section: text,
            section_name: request.section,
            weather_data,
        })
    }
}
