// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_QUERY, DEFAULT_TIMEOUT_MS};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration for a scatter-gather search run.
///
/// Typically loaded from a YAML file by the `conduit` binary.
///
/// # Fields
/// * `query` - Query to broadcast (optional, defaults to [`DEFAULT_QUERY`])
/// * `timeout_ms` - Producer-side deadline in milliseconds (optional, defaults to [`DEFAULT_TIMEOUT_MS`])
/// * `engines` - Engines the query is sent to
///
/// # Example
/// ```yaml
/// query: "rust pipelines"
/// timeout_ms: 500
/// engines:
///   - name: engine1
///     latency_ms: 50
///   - name: engine2
///     latency_ms: 10
///     fail: "index offline"
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    pub query: Option<String>,
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub engines: Vec<EngineConfig>,
}

impl Config {
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or(DEFAULT_QUERY)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }
}

/// One simulated engine.
///
/// When `fail` is set the engine waits out its latency and then reports
/// that message as an error instead of answering.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    pub name: String,
    #[serde(default)]
    pub latency_ms: u64,
    pub fail: Option<String>,
}

impl EngineConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load a config and reject it if any engine or timeout setting is unusable.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
