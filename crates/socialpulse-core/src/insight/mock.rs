//! Mock backend for testing
//!
//! Returns predictable replies without a network call. Useful for unit tests
//! and for running the CLI offline (`SOCIALPULSE_BACKEND=mock`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result, TransportError};

use super::InsightBackend;

/// Mock insight backend
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Fixed reply; when None the reply echoes the prompt's first line
    reply: Option<String>,
    /// Simulate an unreachable endpoint
    failing: bool,
    calls: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with `text`
    pub fn with_reply(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Always fail with a transport error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Number of requests made so far (shared between clones)
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightBackend for MockBackend {
    async fn request_insight(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing {
            return Err(Error::Transport(TransportError::Request(
                "mock backend is unreachable".into(),
            )));
        }

        Ok(match &self.reply {
            Some(reply) => reply.clone(),
            None => format!(
                "Mock insight for: {}",
                prompt.lines().next().unwrap_or_default().trim()
            ),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn endpoint(&self) -> &str {
        "mock://insight"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echoes_first_line() {
        let backend = MockBackend::new();
        let text = backend.request_insight("line one\nline two").await.unwrap();
        assert_eq!(text, "Mock insight for: line one");
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_fixed_reply() {
        let backend = MockBackend::with_reply("Post more reels.");
        assert_eq!(backend.request_insight("?").await.unwrap(), "Post more reels.");
    }

    #[tokio::test]
    async fn test_failing() {
        let backend = MockBackend::failing();
        let err = backend.request_insight("hi").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_calls_shared_between_clones() {
        let backend = MockBackend::new();
        let clone = backend.clone();
        clone.request_insight("a").await.unwrap();
        backend.request_insight("b").await.unwrap();
        assert_eq!(backend.calls(), 2);
    }
}
