//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::{Cursor, Write};

use socialpulse_core::test_utils::MockInsightServer;
use socialpulse_core::{ChatLog, EngagementDataset, InsightClient, InsightConfig, MockBackend};
use tempfile::NamedTempFile;

use crate::commands::{self, truncate, ChatInput, DIVIDER};

const CSV: &str = "\
post_id,post_type,likes,shares,comments,avg_sentiment_score
1,reel,120,30,12,0.8
2,carousel,80,10,6,0.5
3,reel,100,20,8,0.6
4,static_image,40,2,1,0.1
";

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn setup_dataset() -> EngagementDataset {
    let file = write_csv(CSV);
    commands::open_dataset(file.path()).unwrap()
}

async fn run_chat(backend: &MockBackend, input: &str, log: &mut ChatLog) -> String {
    let dataset = setup_dataset();
    let mut output = Vec::new();
    commands::cmd_chat(&dataset, backend, Cursor::new(input), &mut output, log)
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

// ========== Core Tests ==========

#[test]
fn test_open_dataset() {
    let dataset = setup_dataset();
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.categories(), vec!["reel", "carousel", "static_image"]);
}

#[test]
fn test_open_dataset_missing_file() {
    let err = commands::open_dataset(std::path::Path::new("/nonexistent/engagement.csv"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to load engagement data"));
}

#[test]
fn test_open_dataset_missing_column() {
    let file = write_csv("post_id,post_type,likes\n1,reel,5\n");
    assert!(commands::open_dataset(file.path()).is_err());
}

#[test]
fn test_format_turn() {
    let mut log = ChatLog::new();
    let turn = log.push("How are reels doing?", "Very well");
    assert_eq!(
        commands::format_turn(turn),
        format!("You: How are reels doing?\nBot: Very well\n{}", DIVIDER)
    );
}

// ========== Metrics Command Tests ==========

#[test]
fn test_cmd_metrics() {
    let dataset = setup_dataset();
    assert!(commands::cmd_metrics(&dataset, "reel", false).is_ok());
    assert!(commands::cmd_metrics(&dataset, "reel", true).is_ok());
}

#[test]
fn test_cmd_metrics_unknown_category_is_not_fatal() {
    let dataset = setup_dataset();
    assert!(commands::cmd_metrics(&dataset, "Reel", false).is_ok());
    assert!(commands::cmd_metrics(&dataset, "story", true).is_ok());
}

#[test]
fn test_cmd_summary() {
    let dataset = setup_dataset();
    assert!(commands::cmd_summary(&dataset, false).is_ok());
    assert!(commands::cmd_summary(&dataset, true).is_ok());
}

#[test]
fn test_cmd_summary_empty_dataset() {
    let file = write_csv("post_id,post_type,likes,shares,comments,avg_sentiment_score\n");
    let dataset = commands::open_dataset(file.path()).unwrap();
    assert!(dataset.is_empty());
    assert!(commands::cmd_summary(&dataset, false).is_ok());
}

// ========== Insight Command Tests ==========

#[tokio::test]
async fn test_cmd_insight_records_turn() {
    let dataset = setup_dataset();
    let backend = MockBackend::with_reply("Reels lead on every metric");
    let mut log = ChatLog::new();

    commands::cmd_insight(&dataset, &backend, "reel", &mut log)
        .await
        .unwrap();

    assert_eq!(backend.calls(), 1);
    assert_eq!(log.len(), 1);
    assert_eq!(log.turns()[0].user, "Insight for post type 'reel'");
    assert_eq!(log.turns()[0].bot, "Reels lead on every metric");
}

#[tokio::test]
async fn test_cmd_insight_unknown_category_is_a_turn() {
    let dataset = setup_dataset();
    let backend = MockBackend::new();
    let mut log = ChatLog::new();

    commands::cmd_insight(&dataset, &backend, "story", &mut log)
        .await
        .unwrap();

    assert_eq!(backend.calls(), 0);
    assert_eq!(log.turns()[0].bot, "No posts found for post type 'story'");
}

#[tokio::test]
async fn test_cmd_insight_over_http() {
    let server = MockInsightServer::start().await;
    let client = InsightClient::langflow(InsightConfig::new(&server.url(), "ns", "flow", "tok"))
        .unwrap();
    let dataset = setup_dataset();
    let mut log = ChatLog::new();

    commands::cmd_insight(&dataset, &client, "carousel", &mut log)
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let prompt = requests[0].body["input_value"].as_str().unwrap();
    assert!(prompt.contains("carousel"));
    assert!(prompt.contains("80.00"));
    assert!(log.turns()[0].bot.starts_with("Insight for: "));
}

#[tokio::test]
async fn test_cmd_insight_transport_error_is_a_turn() {
    let server = MockInsightServer::with_response(502, "bad gateway").await;
    let client = InsightClient::langflow(InsightConfig::new(&server.url(), "ns", "flow", "tok"))
        .unwrap();
    let dataset = setup_dataset();
    let mut log = ChatLog::new();

    commands::cmd_insight(&dataset, &client, "reel", &mut log)
        .await
        .unwrap();

    assert!(log.turns()[0].bot.starts_with("Request error: "));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_cmd_compare() {
    let server = MockInsightServer::with_reply_text("Reels win").await;
    let client = InsightClient::langflow(InsightConfig::new(&server.url(), "ns", "flow", "tok"))
        .unwrap();
    let dataset = setup_dataset();
    let mut log = ChatLog::new();

    commands::cmd_compare(&dataset, &client, &mut log)
        .await
        .unwrap();

    let prompt = server.requests()[0].body["input_value"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("reel"));
    assert!(prompt.contains("carousel"));
    assert!(prompt.contains("static_image"));
    assert_eq!(log.turns()[0].bot, "Reels win");
}

#[tokio::test]
async fn test_cmd_ask_blank_message() {
    let backend = MockBackend::new();
    let mut log = ChatLog::new();

    commands::cmd_ask(&backend, "   ", &mut log).await.unwrap();

    assert_eq!(backend.calls(), 0);
    assert_eq!(log.turns()[0].bot, "Please enter a message");
}

#[tokio::test]
async fn test_cmd_ask_failing_backend() {
    let backend = MockBackend::failing();
    let mut log = ChatLog::new();

    commands::cmd_ask(&backend, "hello", &mut log).await.unwrap();

    assert!(log.turns()[0].bot.starts_with("Request error: "));
}

// ========== Chat Command Tests ==========

#[test]
fn test_chat_input_parse() {
    assert_eq!(ChatInput::parse("  "), ChatInput::Blank);
    assert_eq!(ChatInput::parse("exit"), ChatInput::Exit);
    assert_eq!(ChatInput::parse(" QUIT "), ChatInput::Exit);
    assert_eq!(ChatInput::parse("/summary"), ChatInput::Summary);
    assert_eq!(ChatInput::parse("/insight reel"), ChatInput::Insight("reel"));
    assert_eq!(ChatInput::parse("/insightful"), ChatInput::Query("/insightful"));
    assert_eq!(ChatInput::parse("how are reels?"), ChatInput::Query("how are reels?"));
}

#[tokio::test]
async fn test_cmd_chat_session() {
    let backend = MockBackend::new();
    let mut log = ChatLog::new();

    let output = run_chat(
        &backend,
        "How are reels doing?\n\n/insight carousel\nexit\nnot reached\n",
        &mut log,
    )
    .await;

    assert_eq!(log.len(), 2);
    assert_eq!(backend.calls(), 2);
    assert_eq!(log.turns()[0].user, "How are reels doing?");
    assert_eq!(log.turns()[0].bot, "Mock insight for: How are reels doing?");
    assert_eq!(log.turns()[1].user, "Insight for post type 'carousel'");

    assert!(output.contains("You: How are reels doing?"));
    assert!(output.contains("Please enter a message"));
    assert!(output.contains(DIVIDER));
    assert!(!output.contains("not reached"));
}

#[tokio::test]
async fn test_cmd_chat_summary_makes_no_request() {
    let backend = MockBackend::new();
    let mut log = ChatLog::new();

    let output = run_chat(&backend, "/summary\n", &mut log).await;

    assert_eq!(backend.calls(), 0);
    assert!(log.is_empty());
    assert!(output.contains("reel (2 posts): likes 110.00, shares 25.00, comments 10.00, sentiment 0.70"));
}

#[tokio::test]
async fn test_cmd_chat_ends_at_eof() {
    let backend = MockBackend::new();
    let mut log = ChatLog::new();

    run_chat(&backend, "one\ntwo", &mut log).await;

    assert_eq!(log.len(), 2);
}

#[test]
fn test_save_transcript() {
    let mut log = ChatLog::new();
    log.push("hi", "hello");
    let file = NamedTempFile::new().unwrap();

    commands::save_transcript(&log, file.path()).unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    assert_eq!(saved["turns"][0]["user"], "hi");
    assert_eq!(saved["turns"][0]["bot"], "hello");
    assert!(saved["turns"][0]["asked_at"].is_string());
}

// ========== Config Command Tests ==========

#[test]
fn test_describe_redacts_token() {
    let config = InsightConfig::new("https://example.test/", "ns-1", "flow-1", "AstraCS:secretvalue")
        .with_endpoint("insights");
    let lines = commands::describe(&config, "environment only").join("\n");

    assert!(lines.contains("https://example.test/lf/ns-1/api/v1/run/insights"));
    assert!(lines.contains("Astr****"));
    assert!(!lines.contains("secretvalue"));
}

#[test]
fn test_describe_short_token_fully_hidden() {
    let config = InsightConfig::new("http://localhost", "ns", "flow", "abc");
    let lines = commands::describe(&config, "x").join("\n");
    assert!(lines.contains("Token:        ****"));
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("this is a long post type", 10), "this is...");
}
