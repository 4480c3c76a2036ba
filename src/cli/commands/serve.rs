//! Web server command.

use console::style;

use crate::config::Config;

/// Start the web server.
pub async fn cmd_serve(config: &Config, bind: Option<&str>) -> anyhow::Result<()> {
    config.validate()?;

    let bind = bind.unwrap_or_else(|| config.bind_address());
    let (host, port) = parse_bind_address(bind)?;

    println!(
        "{} Starting report server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!(
        "  {} Model: {} (temperature {}, max {} tokens)",
        style("→").dim(),
        config.llm.model,
        config.llm.temperature,
        config.llm.max_tokens
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(config, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "8888" -> 127.0.0.1:8888
/// - Just a host: "0.0.0.0" -> 0.0.0.0:8888
/// - Host and port: "0.0.0.0:8888" -> 0.0.0.0:8888
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    if bind.trim().is_empty() {
        anyhow::bail!("Empty bind address");
    }

    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    Ok((bind.to_string(), 8888))
}
