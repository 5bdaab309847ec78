//! Shared command utilities
//!
//! This module contains:
//! - `open_dataset` - Load the engagement CSV
//! - `open_client` - Build the insight client from config and environment
//! - `format_turn` / `print_turn` - Render one chat turn

use std::path::Path;

use anyhow::{Context, Result};
use socialpulse_core::{load_dataset, ChatTurn, EngagementDataset, InsightBackend, InsightClient};
use tracing::debug;

/// Divider printed between chat turns
pub const DIVIDER: &str = "----------------------------------------";

/// Load the engagement dataset
pub fn open_dataset(path: &Path) -> Result<EngagementDataset> {
    let dataset = load_dataset(path)
        .with_context(|| format!("Failed to load engagement data from {}", path.display()))?;
    debug!(
        "{} records, post types: {:?}",
        dataset.len(),
        dataset.categories()
    );
    Ok(dataset)
}

/// Build the insight client
pub fn open_client(config_path: Option<&Path>) -> Result<InsightClient> {
    let client =
        InsightClient::from_env(config_path).context("Failed to configure insight endpoint")?;
    debug!("Insight backend: {} ({})", client.name(), client.endpoint());
    Ok(client)
}

/// `You: ...` / `Bot: ...` followed by the divider
pub fn format_turn(turn: &ChatTurn) -> String {
    format!("You: {}\nBot: {}\n{}", turn.user, turn.bot, DIVIDER)
}

pub fn print_turn(turn: &ChatTurn) {
    println!("{}", format_turn(turn));
}
