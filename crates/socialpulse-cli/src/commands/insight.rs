//! Insight request commands
//!
//! Recoverable failures (unknown post type, blank query, transport and
//! response-shape errors) become the bot's side of the turn. Everything
//! else aborts the command.

use anyhow::Result;
use socialpulse_core::{
    build_comparison_prompt, compute_all_metrics, reply_or_message, request_category_insight,
    ChatLog, EngagementDataset, InsightBackend,
};
use tracing::{info, warn};

use super::print_turn;

/// Label recorded as the user's side of a post-type insight turn
pub fn insight_label(category: &str) -> String {
    format!("Insight for post type '{}'", category)
}

/// Ask about one post type's metrics
pub async fn cmd_insight<B: InsightBackend + ?Sized>(
    dataset: &EngagementDataset,
    backend: &B,
    category: &str,
    log: &mut ChatLog,
) -> Result<()> {
    let bot = insight_reply(dataset, backend, category).await?;
    print_turn(log.push(insight_label(category), bot));
    Ok(())
}

/// Reply text for a post-type insight, or the message for a recoverable failure
pub async fn insight_reply<B: InsightBackend + ?Sized>(
    dataset: &EngagementDataset,
    backend: &B,
    category: &str,
) -> Result<String> {
    match request_category_insight(backend, dataset, category).await {
        Ok(insight) => {
            info!(
                "Insight for '{}' ({} posts) via {}",
                insight.metrics.category,
                insight.metrics.post_count,
                backend.name()
            );
            Ok(insight.text)
        }
        Err(e) if e.is_recoverable() => {
            warn!("Insight for '{}' failed: {}", category, e);
            Ok(e.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

/// Ask the workflow to compare every post type
pub async fn cmd_compare<B: InsightBackend + ?Sized>(
    dataset: &EngagementDataset,
    backend: &B,
    log: &mut ChatLog,
) -> Result<()> {
    let all = compute_all_metrics(dataset);
    if all.is_empty() {
        println!("No engagement records found.");
        return Ok(());
    }

    let prompt = build_comparison_prompt(&all);
    let bot = reply_or_message(backend, &prompt).await?;
    print_turn(log.push("Compare all post types", bot));
    Ok(())
}

/// Send a free-form query
pub async fn cmd_ask<B: InsightBackend + ?Sized>(
    backend: &B,
    message: &str,
    log: &mut ChatLog,
) -> Result<()> {
    let bot = reply_or_message(backend, message).await?;
    print_turn(log.push(message, bot));
    Ok(())
}
