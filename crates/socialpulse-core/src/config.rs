//! Insight endpoint configuration
//!
//! ## Configuration Resolution
//!
//! Values are resolved in two layers:
//! 1. A TOML file: an explicit path, or the default location
//!    (~/.local/share/socialpulse/config.toml on Linux) if it exists
//! 2. Environment variables, which override the file
//!
//! ```toml
//! base_url = "https://api.langflow.astra.datastax.com"
//! namespace_id = "..."
//! flow_id = "..."
//! token = "..."
//! timeout_secs = 30
//!
//! [tweaks.ChatInput-OKUQw]
//! [tweaks.Agent-MsS60]
//! ```
//!
//! There are no built-in defaults for the endpoint or the token.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};

pub const ENV_BASE_URL: &str = "SOCIALPULSE_BASE_URL";
pub const ENV_NAMESPACE_ID: &str = "SOCIALPULSE_NAMESPACE_ID";
pub const ENV_FLOW_ID: &str = "SOCIALPULSE_FLOW_ID";
pub const ENV_ENDPOINT: &str = "SOCIALPULSE_ENDPOINT";
pub const ENV_TOKEN: &str = "SOCIALPULSE_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "SOCIALPULSE_TIMEOUT_SECS";
/// Backend selector (`langflow` or `mock`)
pub const ENV_BACKEND: &str = "SOCIALPULSE_BACKEND";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything needed to call the hosted workflow
#[derive(Clone, PartialEq)]
pub struct InsightConfig {
    pub base_url: String,
    pub namespace_id: String,
    pub flow_id: String,
    /// Endpoint name used instead of `flow_id` in the URL, if set
    pub endpoint: Option<String>,
    pub token: String,
    pub timeout_secs: u64,
    /// Per-component overrides passed through as the `tweaks` object
    pub tweaks: Map<String, Value>,
}

impl fmt::Debug for InsightConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightConfig")
            .field("base_url", &self.base_url)
            .field("namespace_id", &self.namespace_id)
            .field("flow_id", &self.flow_id)
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("tweaks", &self.tweaks)
            .finish()
    }
}

impl InsightConfig {
    pub fn new(base_url: &str, namespace_id: &str, flow_id: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            namespace_id: namespace_id.to_string(),
            flow_id: flow_id.to_string(),
            endpoint: None,
            token: token.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tweaks: Map::new(),
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_tweaks(mut self, tweaks: Map<String, Value>) -> Self {
        self.tweaks = tweaks;
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{base}/lf/{namespace}/api/v1/run/{endpoint or flow id}`
    pub fn run_url(&self) -> String {
        let target = self.endpoint.as_deref().unwrap_or(&self.flow_id);
        format!(
            "{}/lf/{}/api/v1/run/{}",
            self.base_url, self.namespace_id, target
        )
    }

    /// Resolve from the config file (if any) and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::resolve(path, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve<F>(path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = match path {
            Some(p) => read_config_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => read_config_file(&p)?,
                _ => RawConfig::default(),
            },
        };
        raw.merge_env(env).finish()
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("socialpulse").join("config.toml"))
}

fn read_config_file(path: &Path) -> Result<RawConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {}", path.display(), e))
    })?;
    debug!("Read insight config from {}", path.display());
    parse_config(&content)
}

/// Parse a TOML config document
pub(crate) fn parse_config(content: &str) -> Result<RawConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawConfig {
    base_url: Option<String>,
    namespace_id: Option<String>,
    flow_id: Option<String>,
    endpoint: Option<String>,
    token: Option<String>,
    timeout_secs: Option<u64>,
    tweaks: Option<Map<String, Value>>,
    /// Set when an env var could not be parsed; reported by `finish`
    #[serde(skip)]
    env_error: Option<String>,
}

impl RawConfig {
    fn merge_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_BASE_URL) {
            self.base_url = Some(v);
        }
        if let Some(v) = get(ENV_NAMESPACE_ID) {
            self.namespace_id = Some(v);
        }
        if let Some(v) = get(ENV_FLOW_ID) {
            self.flow_id = Some(v);
        }
        if let Some(v) = get(ENV_ENDPOINT) {
            self.endpoint = Some(v);
        }
        if let Some(v) = get(ENV_TOKEN) {
            self.token = Some(v);
        }
        if let Some(v) = get(ENV_TIMEOUT_SECS) {
            match v.trim().parse::<u64>() {
                Ok(secs) => self.timeout_secs = Some(secs),
                Err(_) => {
                    self.env_error = Some(format!(
                        "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{v}'"
                    ))
                }
            }
        }
        self
    }

    fn finish(self) -> Result<InsightConfig> {
        if let Some(err) = self.env_error {
            return Err(Error::Config(err));
        }

        // Blank values from the file count as unset, as blank env vars do
        let base_url = non_blank(self.base_url);
        let namespace_id = non_blank(self.namespace_id);
        let flow_id = non_blank(self.flow_id);
        let endpoint = non_blank(self.endpoint);
        let token = non_blank(self.token);

        let mut missing = Vec::new();
        if base_url.is_none() {
            missing.push("base_url");
        }
        if namespace_id.is_none() {
            missing.push("namespace_id");
        }
        if flow_id.is_none() && endpoint.is_none() {
            missing.push("flow_id");
        }
        if token.is_none() {
            missing.push("token");
        }
        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing insight setting(s): {} (set them in the config file or via SOCIALPULSE_* environment variables)",
                missing.join(", ")
            )));
        }

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than zero".into()));
        }

        Ok(InsightConfig {
            base_url: base_url
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            namespace_id: namespace_id.unwrap_or_default(),
            flow_id: flow_id.unwrap_or_default(),
            endpoint,
            token: token.unwrap_or_default(),
            timeout_secs,
            tweaks: self.tweaks.unwrap_or_default(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
