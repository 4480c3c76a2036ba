//! One-off section generation from the command line.

use std::path::Path;

use console::style;
use serde_json::Value;
use tokio::io::AsyncReadExt;

use crate::config::Config;
use crate::report::Section;
use crate::services::{GenerateRequest, ReportService};

/// Generate one section and print it to stdout.
pub async fn cmd_generate(
    config: &Config,
    section: &str,
    context_path: Option<&Path>,
    instructions: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    config.validate()?;

    let context = match context_path {
        Some(path) => read_context(path).await?,
        None => Value::Object(serde_json::Map::new()),
    };

    if Section::from_name(section).is_none() {
        eprintln!(
            "{} Unknown section '{}', using the generic prompt",
            style("!").yellow(),
            section
        );
    }

    let mut request = GenerateRequest::new(section, context);
    if let Some(text) = instructions {
        request = request.with_instructions(text);
    }

    let service = ReportService::from_config(config)?;
    let response = service.generate(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.section);
    }

    Ok(())
}

/// Read a context object from a file, or stdin when the path is `-`.
async fn read_context(path: &Path) -> anyhow::Result<Value> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?
    };

    let value: Value = serde_json::from_str(&contents)?;
    if !value.is_object() {
        anyhow::bail!("Context must be a JSON object");
    }
    Ok(value)
}
