//! Show the resolved endpoint configuration

use std::path::Path;

use anyhow::{Context, Result};
use socialpulse_core::config::{default_config_path, ENV_BACKEND};
use socialpulse_core::InsightConfig;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let backend = std::env::var(ENV_BACKEND).unwrap_or_else(|_| "langflow".into());
    if backend.eq_ignore_ascii_case("mock") {
        println!("Backend: mock ({}=mock), no endpoint settings needed", ENV_BACKEND);
        return Ok(());
    }

    let config = InsightConfig::load(config_path).context("Failed to resolve insight config")?;
    let source = config_path
        .map(|p| p.display().to_string())
        .or_else(|| {
            default_config_path()
                .filter(|p| p.exists())
                .map(|p| p.display().to_string())
        })
        .unwrap_or_else(|| "environment only".to_string());

    for line in describe(&config, &source) {
        println!("{}", line);
    }
    Ok(())
}

/// Human-readable config lines, token redacted
pub fn describe(config: &InsightConfig, source: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Source:       {}", source),
        format!("Run URL:      {}", config.run_url()),
        format!("Namespace:    {}", config.namespace_id),
        format!("Flow:         {}", config.flow_id),
    ];
    if let Some(endpoint) = &config.endpoint {
        lines.push(format!("Endpoint:     {}", endpoint));
    }
    lines.push(format!("Token:        {}", redact(&config.token)));
    lines.push(format!("Timeout:      {}s", config.timeout_secs));
    if !config.tweaks.is_empty() {
        let keys: Vec<&str> = config.tweaks.keys().map(|k| k.as_str()).collect();
        lines.push(format!("Tweaks:       {}", keys.join(", ")));
    }
    lines
}

/// Keep a short prefix so tokens can be told apart
fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    if token.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", prefix)
    }
}
