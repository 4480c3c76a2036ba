//! LLM integration for report section generation.

mod client;

pub use client::{LlmClient, LlmConfig, LlmError};
