//! SocialPulse Core Library
//!
//! Shared functionality for the SocialPulse engagement insight tool:
//! - CSV loading of social-media engagement records
//! - Per-post-type engagement averages
//! - Prompt building from those averages
//! - Pluggable insight backends (hosted run-flow workflow, mock)
//! - Endpoint configuration from file and environment

pub mod config;
pub mod error;
pub mod import;
pub mod insight;
pub mod metrics;
pub mod models;
pub mod prompts;

/// Test utilities including mock insight server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::InsightConfig;
pub use error::{Error, PathStep, ResponseShapeError, Result, ShapeFault, TransportError};
pub use import::{load_dataset, parse_dataset};
pub use insight::{
    reply_or_message, request_category_insight, CategoryInsight, InsightBackend, InsightClient,
    LangflowBackend, MockBackend,
};
pub use metrics::{compute_all_metrics, compute_metrics, top_category_by};
pub use models::{
    CategoryMetrics, ChatLog, ChatTurn, EngagementDataset, EngagementRecord, MetricKind,
};
pub use prompts::{build_comparison_prompt, build_metrics_prompt};
