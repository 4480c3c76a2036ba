//! Coercion of loosely-typed request fields into safe defaults.
//!
//! Callers send whatever their form produced: missing keys, `null`, numbers
//! where strings were expected. Everything read from a request context goes
//! through these helpers so prompt templates never see a hole.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Fallback used for any missing text field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default separator for joined list fields.
pub const LIST_SEPARATOR: &str = ", ";

/// Return the string if it has non-whitespace content, otherwise `fallback`.
///
/// The original (untrimmed) string is returned when it qualifies.
pub fn safe_string(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => fallback.to_string(),
    }
}

/// Join a non-empty array into a single string, otherwise return `fallback`.
pub fn safe_array_join(value: Option<&Value>, fallback: &str, separator: &str) -> String {
    match value {
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(separator),
        _ => fallback.to_string(),
    }
}

/// Parse a loss/investigation date. Returns `None` when missing or unparseable.
pub fn safe_parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    let raw = match value {
        Some(Value::String(s)) => s.trim(),
        _ => return None,
    };
    if raw.is_empty() {
        return None;
    }
    parse_date_str(raw)
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc().date());
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Render a JSON value the way a browser would when joining array elements.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Request context with every field already coerced to a displayable string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub investigation_date: String,
    pub date_of_loss: String,
    pub claim_types: String,
    pub property_type: String,
    pub property_age: String,
    pub construction_type: String,
    pub current_use: String,
    pub square_footage: String,
    pub location: String,
    pub client_name: String,
    pub affected_areas: String,
    pub engineer_name: String,
    pub engineer_email: String,
    pub engineer_license: String,
    pub engineer_phone: String,
}

impl ReportContext {
    /// Normalize a raw context object. `None` or non-object input yields all fallbacks.
    pub fn from_value(context: Option<&Value>) -> Self {
        let field = |key: &str| context.and_then(|c| c.get(key));
        let text = |key: &str| safe_string(field(key), NOT_AVAILABLE);

        Self {
            investigation_date: text("investigationDate"),
            date_of_loss: text("dateOfLoss"),
            claim_types: safe_array_join(field("claimType"), NOT_AVAILABLE, LIST_SEPARATOR),
            property_type: text("propertyType"),
            property_age: text("propertyAge"),
            construction_type: text("constructionType"),
            current_use: text("currentUse"),
            square_footage: text("squareFootage"),
            location: text("location"),
            client_name: text("clientName"),
            affected_areas: safe_array_join(field("affectedAreas"), "None", LIST_SEPARATOR),
            engineer_name: safe_string(field("engineerName"), "Engineer Name"),
            engineer_email: safe_string(field("engineerEmail"), "Engineer Email"),
            engineer_license: safe_string(field("engineerLicense"), "Engineer License Number"),
            engineer_phone: safe_string(field("engineerPhone"), "Engineer Phone"),
        }
    }
}
