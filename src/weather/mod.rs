//! Historical weather enrichment.
//!
//! Looks up observed conditions for the claimed date of loss so the
//! meteorologist section can cite wind gusts, hail and precipitation.
//! Lookups never fail the caller: errors degrade to an empty data object.
//!
//! API: `GET {endpoint}/history.json?key=..&q=<location>&dt=<YYYY-MM-DD>`

mod config;

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, warn};

pub use config::WeatherConfig;

/// Summary of a day's observations, shaped for prompt embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub max_temp: String,
    pub min_temp: String,
    pub avg_temp: String,
    pub max_wind_gust: String,
    pub max_wind_time: String,
    pub total_precip: String,
    pub humidity: String,
    pub conditions: String,
    pub hail_possible: String,
    pub thunderstorm: String,
}

/// Outcome of a weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherLookup {
    pub success: bool,
    #[serde(serialize_with = "serialize_data")]
    pub data: Option<WeatherSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn serialize_data<S: Serializer>(
    data: &Option<WeatherSummary>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match data {
        Some(summary) => summary.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

impl WeatherLookup {
    /// Lookup not attempted (missing location or date).
    pub fn skipped() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn found(summary: WeatherSummary) -> Self {
        Self {
            success: true,
            data: Some(summary),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Weather data as a JSON object; empty when nothing was found.
    pub fn data_json(&self) -> serde_json::Value {
        self.data
            .as_ref()
            .and_then(|d| serde_json::to_value(d).ok())
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
    }
}

/// Errors from the weather API.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API key not configured")]
    MissingApiKey,
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Response contained no forecast days")]
    NoForecast,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    forecast: Forecast,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    #[serde(default)]
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    day: DayData,
    #[serde(default)]
    hour: Vec<HourData>,
}

#[derive(Debug, Deserialize)]
struct DayData {
    maxtemp_f: f64,
    mintemp_f: f64,
    avgtemp_f: f64,
    totalprecip_in: f64,
    avghumidity: f64,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct HourData {
    #[serde(default)]
    time: Option<String>,
    gust_mph: f64,
}

/// Historical weather client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    config: WeatherConfig,
    client: Client,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Look up weather for a loss, degrading every failure to a failed result.
    ///
    /// Missing location or date skips the call entirely.
    pub async fn lookup(&self, location: Option<&str>, date: Option<NaiveDate>) -> WeatherLookup {
        let (location, date) = match (location, date) {
            (Some(loc), Some(date)) if !loc.trim().is_empty() => (loc, date),
            _ => {
                debug!("Skipping weather lookup: location or date missing");
                return WeatherLookup::skipped();
            }
        };

        match self.history(location, date).await {
            Ok(summary) => WeatherLookup::found(summary),
            Err(e) => {
                warn!("Weather lookup for {} on {} failed: {}", location, date, e);
                WeatherLookup::failed(e.to_string())
            }
        }
    }

    /// Fetch and summarize observations for one day.
    pub async fn history(&self, location: &str, date: NaiveDate) -> Result<WeatherSummary, WeatherError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey)?;
        let dt = date.format("%Y-%m-%d").to_string();

        debug!("Fetching weather history for {} on {}", location, dt);
        let resp = self
            .client
            .get(self.config.history_url())
            .query(&[("key", api_key), ("q", location), ("dt", dt.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(WeatherError::Api(format!("HTTP {}: {}", status, body)));
        }

        let history: HistoryResponse = resp
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let day = history
            .forecast
            .forecastday
            .into_iter()
            .next()
            .ok_or(WeatherError::NoForecast)?;

        Ok(summarize(day))
    }
}

fn summarize(day: ForecastDay) -> WeatherSummary {
    let (max_wind_gust, max_wind_time) = peak_gust(&day.hour);
    let conditions = day.day.condition.text;
    let lowered = conditions.to_lowercase();

    WeatherSummary {
        max_temp: format!("{}°F", format_number(day.day.maxtemp_f)),
        min_temp: format!("{}°F", format_number(day.day.mintemp_f)),
        avg_temp: format!("{}°F", format_number(day.day.avgtemp_f)),
        max_wind_gust,
        max_wind_time,
        total_precip: format!("{} inches", format_number(day.day.totalprecip_in)),
        humidity: format!("{}%", format_number(day.day.avghumidity)),
        hail_possible: yes_no(lowered.contains("hail")),
        thunderstorm: yes_no(lowered.contains("thunder")),
        conditions,
    }
}

/// Highest hourly gust and the time of the first hour reaching it.
fn peak_gust(hours: &[HourData]) -> (String, String) {
    let max = hours
        .iter()
        .map(|h| h.gust_mph)
        .fold(None, |acc: Option<f64>, g| Some(acc.map_or(g, |m| m.max(g))));

    match max {
        Some(max) => {
            let time = hours
                .iter()
                .find(|h| h.gust_mph == max)
                .and_then(|h| h.time.clone())
                .unwrap_or_else(|| "N/A".to_string());
            (format!("{} mph", format_number(max)), time)
        }
        None => ("N/A".to_string(), "N/A".to_string()),
    }
}

/// Whole numbers print without a fractional part.
fn format_number(n: f64) -> String {
    n.to_string()
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "Yes" } else { "No" };
    answer.to_string()
}
