//! Insight request adapter
//!
//! Turns a prompt into reply text from an external text-generation workflow.
//!
//! # Architecture
//!
//! - `InsightBackend` trait: the single `request_insight` operation
//! - `InsightClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `LangflowBackend` (HTTP), `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! let client = InsightClient::from_env(None)?;
//! let metrics = compute_metrics(&dataset, "reel")?;
//! let text = client.request_insight(&build_metrics_prompt(&metrics)).await?;
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `SOCIALPULSE_BACKEND`: Backend to use (langflow, mock). Default: langflow
//! - Endpoint settings: see [`crate::config`]

mod langflow;
mod mock;
pub mod parsing;

pub use langflow::LangflowBackend;
pub use mock::MockBackend;
pub use parsing::{extract_message_text, extract_reply_text, REPLY_TEXT_PATH};

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::config::{InsightConfig, ENV_BACKEND};
use crate::error::Result;
use crate::metrics::compute_metrics;
use crate::models::{CategoryMetrics, EngagementDataset};
use crate::prompts::build_metrics_prompt;

/// Trait defining the interface for insight backends
///
/// One call makes at most one outbound request. Replies are not cached and
/// repeated calls may return different text.
#[async_trait]
pub trait InsightBackend: Send + Sync {
    /// Send `prompt` and return the reply text
    async fn request_insight(&self, prompt: &str) -> Result<String>;

    /// Short backend name (for logging)
    fn name(&self) -> &str;

    /// Where requests go (for logging)
    fn endpoint(&self) -> &str;
}

/// Concrete insight client enum
#[derive(Clone)]
pub enum InsightClient {
    /// Hosted workflow over HTTP
    Langflow(LangflowBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl InsightClient {
    /// Create a client from the environment and optional config file
    ///
    /// `SOCIALPULSE_BACKEND=mock` selects the mock backend and needs no
    /// endpoint settings.
    pub fn from_env(config_path: Option<&Path>) -> Result<Self> {
        let backend = std::env::var(ENV_BACKEND).unwrap_or_else(|_| "langflow".into());

        match backend.to_lowercase().as_str() {
            "mock" => Ok(InsightClient::Mock(MockBackend::new())),
            "langflow" => Self::langflow(InsightConfig::load(config_path)?),
            _ => {
                warn!(backend = %backend, "Unknown SOCIALPULSE_BACKEND, falling back to langflow");
                Self::langflow(InsightConfig::load(config_path)?)
            }
        }
    }

    pub fn langflow(config: InsightConfig) -> Result<Self> {
        Ok(InsightClient::Langflow(LangflowBackend::new(config)?))
    }

    pub fn mock() -> Self {
        InsightClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl InsightBackend for InsightClient {
    async fn request_insight(&self, prompt: &str) -> Result<String> {
        match self {
            InsightClient::Langflow(b) => b.request_insight(prompt).await,
            InsightClient::Mock(b) => b.request_insight(prompt).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            InsightClient::Langflow(b) => b.name(),
            InsightClient::Mock(b) => b.name(),
        }
    }

    fn endpoint(&self) -> &str {
        match self {
            InsightClient::Langflow(b) => b.endpoint(),
            InsightClient::Mock(b) => b.endpoint(),
        }
    }
}

/// Metrics, the prompt built from them, and the reply
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInsight {
    pub metrics: CategoryMetrics,
    pub prompt: String,
    pub text: String,
}

/// Compute a post type's metrics and ask the backend about them
pub async fn request_category_insight<B: InsightBackend + ?Sized>(
    backend: &B,
    dataset: &EngagementDataset,
    category: &str,
) -> Result<CategoryInsight> {
    let metrics = compute_metrics(dataset, category)?;
    let prompt = build_metrics_prompt(&metrics);
    let text = backend.request_insight(&prompt).await?;
    Ok(CategoryInsight {
        metrics,
        prompt,
        text,
    })
}

/// Reply text, or the human-readable message for a recoverable failure
///
/// Unrecoverable errors (configuration, data loading) are still returned.
pub async fn reply_or_message<B: InsightBackend + ?Sized>(
    backend: &B,
    prompt: &str,
) -> Result<String> {
    match backend.request_insight(prompt).await {
        Ok(text) => Ok(text),
        Err(e) if e.is_recoverable() => {
            warn!("Insight request via {} failed: {}", backend.name(), e);
            Ok(e.to_string())
        }
        Err(e) => Err(e),
    }
}
