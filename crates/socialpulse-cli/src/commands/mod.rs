//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_dataset, open_client, print_turn)
//! - `metrics` - Engagement averages (metrics, summary)
//! - `insight` - Insight requests (insight, compare, ask)
//! - `chat` - Interactive session and transcript saving
//! - `config` - Show the resolved endpoint configuration

pub mod chat;
pub mod config;
pub mod core;
pub mod insight;
pub mod metrics;

// Re-export command functions for main.rs
pub use chat::*;
pub use config::*;
pub use core::*;
pub use insight::*;
pub use metrics::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
