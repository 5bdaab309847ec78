//! Data models for SocialPulse

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One post with its engagement counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementRecord {
    pub post_id: String,
    /// Category label (e.g. "video", "carousel")
    pub post_type: String,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    /// Typically in [-1, 1]
    pub avg_sentiment_score: f64,
}

/// All records from the source file, in file order
///
/// Loaded once at startup and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct EngagementDataset {
    records: Vec<EngagementRecord>,
}

impl EngagementDataset {
    pub fn new(records: Vec<EngagementRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EngagementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct post types in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.post_type.as_str()) {
                seen.push(&record.post_type);
            }
        }
        seen
    }

    /// Records whose post type equals `category` exactly (case-sensitive)
    pub fn records_for<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a EngagementRecord> + 'a {
        self.records.iter().filter(move |r| r.post_type == category)
    }
}

/// Mean engagement for one post type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMetrics {
    pub category: String,
    pub post_count: usize,
    pub average_likes: f64,
    pub average_shares: f64,
    pub average_comments: f64,
    pub average_sentiment: f64,
}

impl CategoryMetrics {
    pub fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Likes => self.average_likes,
            MetricKind::Shares => self.average_shares,
            MetricKind::Comments => self.average_comments,
            MetricKind::Sentiment => self.average_sentiment,
        }
    }
}

/// Which average to rank categories by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Likes,
    Shares,
    Comments,
    Sentiment,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Shares => "shares",
            Self::Comments => "comments",
            Self::Sentiment => "sentiment",
        }
    }

    pub fn all() -> &'static [MetricKind] {
        &[Self::Likes, Self::Shares, Self::Comments, Self::Sentiment]
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "likes" => Ok(Self::Likes),
            "shares" => Ok(Self::Shares),
            "comments" => Ok(Self::Comments),
            "sentiment" => Ok(Self::Sentiment),
            other => Err(format!("unknown metric: {other}")),
        }
    }
}

/// One user query and the reply shown for it
///
/// `bot` holds either the insight text or the human-readable error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTurn {
    pub user: String,
    pub bot: String,
    pub asked_at: DateTime<Utc>,
}

/// Append-only conversation log owned by the presentation layer
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatLog {
    turns: Vec<ChatTurn>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, user: impl Into<String>, bot: impl Into<String>) -> &ChatTurn {
        self.turns.push(ChatTurn {
            user: user.into(),
            bot: bot.into(),
            asked_at: Utc::now(),
        });
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
