//! Report section prompt assembly.
//!
//! - `normalize`: coercion of request fields into safe defaults
//! - `section`: section identifiers and weather-skip rules
//! - `prompts`: per-section templates and the system prompt

mod normalize;
mod prompts;
mod section;

pub use normalize::{
    safe_array_join, safe_parse_date, safe_string, ReportContext, LIST_SEPARATOR, NOT_AVAILABLE,
};
pub use prompts::{build_section_prompt, SYSTEM_PROMPT};
pub use section::{section_skips_weather, Section};
