//! Interactive chat session
//!
//! One query per input line. `exit` or `quit` (or EOF) ends the session.
//! `/insight <post type>` asks about that post type's metrics and `/summary`
//! prints every post type's averages without calling the workflow.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use socialpulse_core::{
    compute_all_metrics, reply_or_message, ChatLog, EngagementDataset, Error, InsightBackend,
};
use tracing::{debug, info};

use super::{format_turn, insight_label, insight_reply};

/// What one input line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput<'a> {
    Blank,
    Exit,
    Summary,
    Insight(&'a str),
    Query(&'a str),
}

impl<'a> ChatInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ChatInput::Blank;
        }
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            return ChatInput::Exit;
        }
        if trimmed == "/summary" {
            return ChatInput::Summary;
        }
        if let Some(rest) = trimmed.strip_prefix("/insight") {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return ChatInput::Insight(rest.trim());
            }
        }
        ChatInput::Query(trimmed)
    }
}

/// Run the session until `exit` or end of input
pub async fn cmd_chat<B, R, W>(
    dataset: &EngagementDataset,
    backend: &B,
    input: R,
    mut output: W,
    log: &mut ChatLog,
) -> Result<()>
where
    B: InsightBackend + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "💬 Social media performance chat ({} records). Type 'exit' to quit.",
        dataset.len()
    )?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        let turn = match ChatInput::parse(&line) {
            ChatInput::Exit => break,
            ChatInput::Blank => {
                writeln!(output, "{}", Error::EmptyPrompt)?;
                continue;
            }
            ChatInput::Summary => {
                write_summary(dataset, &mut output)?;
                continue;
            }
            ChatInput::Insight(category) => {
                let bot = insight_reply(dataset, backend, category).await?;
                log.push(insight_label(category), bot)
            }
            ChatInput::Query(query) => {
                let bot = reply_or_message(backend, query).await?;
                log.push(query, bot)
            }
        };
        writeln!(output, "{}", format_turn(turn))?;
    }

    info!("Chat session ended after {} turns", log.len());
    Ok(())
}

fn write_summary<W: Write>(dataset: &EngagementDataset, output: &mut W) -> Result<()> {
    let all = compute_all_metrics(dataset);
    if all.is_empty() {
        writeln!(output, "No engagement records found.")?;
    }
    for m in &all {
        writeln!(
            output,
            "{} ({} posts): likes {:.2}, shares {:.2}, comments {:.2}, sentiment {:.2}",
            m.category,
            m.post_count,
            m.average_likes,
            m.average_shares,
            m.average_comments,
            m.average_sentiment
        )?;
    }
    Ok(())
}

/// Write the conversation as pretty JSON
pub fn save_transcript(log: &ChatLog, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(log)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
    debug!("Saved {} turns to {}", log.len(), path.display());
    println!("✅ Saved {} turns to {}", log.len(), path.display());
    Ok(())
}
