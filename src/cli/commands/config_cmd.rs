//! Configuration inspection command.

use console::style;

use crate::config::Config;

/// Print the effective configuration as TOML.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    let source = config
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults + environment".to_string());

    eprintln!("{} Source: {}", style("→").dim(), source);
    eprintln!(
        "{} OpenAI key: {}",
        style("→").dim(),
        key_status(config.llm.has_api_key())
    );
    eprintln!(
        "{} Weather key: {}",
        style("→").dim(),
        key_status(config.weather.has_api_key())
    );

    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn key_status(present: bool) -> console::StyledObject<&'static str> {
    if present {
        style("set").green()
    } else {
        style("missing").red()
    }
}
