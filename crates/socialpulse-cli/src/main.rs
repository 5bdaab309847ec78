//! SocialPulse CLI - Social media performance analysis
//!
//! Usage:
//!   socialpulse metrics --category reel     Average engagement for a post type
//!   socialpulse summary                     Averages for every post type
//!   socialpulse insight --category reel     AI insight on a post type
//!   socialpulse ask "What should we post?"  Free-form query
//!   socialpulse chat                        Interactive session

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use socialpulse_core::ChatLog;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    // The conversation lives here, for the lifetime of the process
    let mut log = ChatLog::new();

    match cli.command {
        Commands::Metrics { category, json } => {
            let dataset = commands::open_dataset(&cli.data)?;
            commands::cmd_metrics(&dataset, &category, json)
        }
        Commands::Summary { json } => {
            let dataset = commands::open_dataset(&cli.data)?;
            commands::cmd_summary(&dataset, json)
        }
        Commands::Insight { category } => {
            let dataset = commands::open_dataset(&cli.data)?;
            let client = commands::open_client(cli.config.as_deref())?;
            commands::cmd_insight(&dataset, &client, &category, &mut log).await
        }
        Commands::Compare => {
            let dataset = commands::open_dataset(&cli.data)?;
            let client = commands::open_client(cli.config.as_deref())?;
            commands::cmd_compare(&dataset, &client, &mut log).await
        }
        Commands::Ask { message } => {
            let client = commands::open_client(cli.config.as_deref())?;
            commands::cmd_ask(&client, &message, &mut log).await
        }
        Commands::Chat { save } => {
            let dataset = commands::open_dataset(&cli.data)?;
            let client = commands::open_client(cli.config.as_deref())?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            commands::cmd_chat(&dataset, &client, stdin.lock(), stdout.lock(), &mut log).await?;
            if let Some(path) = save {
                commands::save_transcript(&log, &path)?;
            }
            Ok(())
        }
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
    }
}
