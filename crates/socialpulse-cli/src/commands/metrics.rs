//! Engagement average commands

use anyhow::Result;
use serde_json::json;
use socialpulse_core::{
    compute_all_metrics, compute_metrics, top_category_by, CategoryMetrics, EngagementDataset,
    MetricKind,
};
use tracing::warn;

use super::truncate;

/// Show averages for one post type
///
/// An unknown post type prints a message instead of failing the command.
pub fn cmd_metrics(dataset: &EngagementDataset, category: &str, json: bool) -> Result<()> {
    let metrics = match compute_metrics(dataset, category) {
        Ok(metrics) => metrics,
        Err(e) if e.is_recoverable() => {
            warn!("Metrics for '{}' unavailable: {}", category, e);
            if json {
                let output = json!({ "error": e.to_string() });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", e);
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!("📊 {} ({} posts)\n", metrics.category, metrics.post_count);
    for kind in MetricKind::all() {
        println!("  {:<10} {:>10.2}", kind.as_str(), metrics.value(*kind));
    }

    Ok(())
}

/// Show averages for every post type, plus the leader per metric
pub fn cmd_summary(dataset: &EngagementDataset, json: bool) -> Result<()> {
    let all = compute_all_metrics(dataset);

    if json {
        let leaders: serde_json::Map<String, serde_json::Value> = MetricKind::all()
            .iter()
            .filter_map(|kind| {
                top_category_by(dataset, *kind)
                    .map(|m| (kind.as_str().to_string(), json!(m.category)))
            })
            .collect();
        let output = json!({
            "records": dataset.len(),
            "categories": all,
            "top": leaders,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if all.is_empty() {
        println!("No engagement records found.");
        return Ok(());
    }

    println!("📊 Engagement by post type ({} records)\n", dataset.len());
    print_table(&all);

    println!("\n🏆 Top post type");
    for kind in MetricKind::all() {
        if let Some(top) = top_category_by(dataset, *kind) {
            println!(
                "  {:<10} {} ({:.2})",
                kind.as_str(),
                top.category,
                top.value(*kind)
            );
        }
    }

    Ok(())
}

fn print_table(all: &[CategoryMetrics]) {
    println!(
        "  {:<16} {:>6} {:>10} {:>10} {:>10} {:>10}",
        "post type", "posts", "likes", "shares", "comments", "sentiment"
    );
    for m in all {
        println!(
            "  {:<16} {:>6} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            truncate(&m.category, 16),
            m.post_count,
            m.average_likes,
            m.average_shares,
            m.average_comments,
            m.average_sentiment
        );
    }
}
