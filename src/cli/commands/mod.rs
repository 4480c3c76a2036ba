//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod generate;
mod sections;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::load_config;

#[derive(Parser)]
#[command(name = "forensic-report")]
#[command(about = "Forensic engineering report section generator")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address: PORT, HOST, or HOST:PORT (default: 127.0.0.1:8888)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Generate a single report section and print it
    Generate {
        /// Section name (e.g. introduction, meteorologist, openingLetter)
        section: String,
        /// JSON file holding the report context (use - for stdin)
        #[arg(long)]
        context: Option<PathBuf>,
        /// Additional instructions appended to the section prompt
        #[arg(short, long)]
        instructions: Option<String>,
        /// Print the full JSON response instead of just the text
        #[arg(long)]
        json: bool,
    },

    /// List known report sections
    Sections,

    /// Show the effective configuration (API keys are never printed)
    Config,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&config, bind.as_deref()).await,
        Commands::Generate {
            section,
            context,
            instructions,
            json,
        } => {
            generate::cmd_generate(
                &config,
                &section,
                context.as_deref(),
                instructions.as_deref(),
                json,
            )
            .await
        }
        Commands::Sections => sections::cmd_sections(),
        Commands::Config => config_cmd::cmd_config_show(&config),
    }
}
