//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SocialPulse - Social media performance analysis
#[derive(Parser)]
#[command(name = "socialpulse")]
#[command(about = "Engagement averages per post type, with AI-generated insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engagement CSV file
    #[arg(long, default_value = "social_media_engagement.csv", global = true)]
    pub data: PathBuf,

    /// Insight endpoint config file (TOML)
    ///
    /// Defaults to ~/.local/share/socialpulse/config.toml when present.
    /// SOCIALPULSE_* environment variables override values from the file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show average engagement for one post type
    Metrics {
        /// Post type (exact, case-sensitive match)
        #[arg(short, long)]
        category: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show average engagement for every post type
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the insight workflow about one post type's metrics
    Insight {
        /// Post type (exact, case-sensitive match)
        #[arg(short, long)]
        category: String,
    },

    /// Ask the insight workflow to compare every post type
    Compare,

    /// Send a free-form query to the insight workflow
    Ask {
        /// Query text
        message: String,
    },

    /// Interactive session: one query per line, `exit` to quit
    ///
    /// Lines of the form `/insight <post type>` ask about that post type's
    /// metrics; `/summary` prints all averages.
    Chat {
        /// Write the conversation to this file as JSON when the session ends
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show the resolved insight endpoint configuration
    Config,
}
