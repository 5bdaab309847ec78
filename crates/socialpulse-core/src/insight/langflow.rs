//! Hosted workflow ("run flow") backend
//!
//! Sends a chat prompt to `{base}/lf/{namespace}/api/v1/run/{flow}` and pulls
//! the reply out of the nested response. One attempt per call, no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::InsightConfig;
use crate::error::{Error, Result, TransportError};

use super::parsing::extract_reply_text;
use super::InsightBackend;

/// Longest error body kept in a `TransportError::Status`
const MAX_ERROR_BODY: usize = 500;

/// Run-flow backend
///
/// # Example
///
/// ```rust,ignore
/// let config = InsightConfig::load(None)?;
/// let backend = LangflowBackend::new(config)?;
/// let text = backend.request_insight("How do reels perform?").await?;
/// ```
#[derive(Clone)]
pub struct LangflowBackend {
    http_client: Client,
    config: InsightConfig,
    run_url: String,
}

impl LangflowBackend {
    /// Create a backend whose client enforces the configured timeout
    pub fn new(config: InsightConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Transport(TransportError::Request(e.to_string())))?;
        let run_url = config.run_url();
        Ok(Self {
            http_client,
            config,
            run_url,
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> RunFlowRequest<'a> {
        RunFlowRequest {
            input_value: prompt,
            output_type: "chat",
            input_type: "chat",
            tweaks: &self.config.tweaks,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Transport(TransportError::Timeout(self.config.timeout_secs))
        } else {
            Error::Transport(TransportError::Request(e.to_string()))
        }
    }

    /// POST the prompt and return the raw response body
    async fn run_flow(&self, prompt: &str) -> Result<String> {
        let response = self
            .http_client
            .post(&self.run_url)
            .bearer_auth(&self.config.token)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read HTTP {} error body: {}", status.as_u16(), e);
                    String::new()
                }
            };
            warn!("Run flow returned HTTP {}", status.as_u16());
            return Err(Error::Transport(TransportError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            }));
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }
}

/// Run-flow request body
#[derive(Debug, Serialize)]
struct RunFlowRequest<'a> {
    input_value: &'a str,
    output_type: &'static str,
    input_type: &'static str,
    tweaks: &'a Map<String, Value>,
}

#[async_trait]
impl InsightBackend for LangflowBackend {
    async fn request_insight(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }

        debug!("Requesting insight from {} ({} chars)", self.run_url, prompt.len());
        let body = self.run_flow(prompt).await?;
        let text = extract_reply_text(&body)?;
        debug!("Insight reply: {} chars", text.len());
        Ok(text)
    }

    fn name(&self) -> &str {
        "langflow"
    }

    fn endpoint(&self) -> &str {
        &self.run_url
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
