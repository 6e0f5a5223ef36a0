use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Betweenness scores closer than this are treated as a tie.
pub const SCORE_EPSILON: f64 = 1e-9;

pub(crate) const DEFAULT_LOG_DIR: &str = "logs";

pub(crate) const DEFAULT_LOG_FILTER: &str = "info";

/// Settings of the script runner, read from a YAML file.
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub log_dir: String, // Where `default.log` goes.
    pub log_filter: String, // env_logger filter, `RUST_LOG` still wins.
    pub json_output: bool, // Print query results as JSON.
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            log_dir: DEFAULT_LOG_DIR.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            json_output: false,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // An empty document means all defaults.
        if text.trim().is_empty() {
            return Ok(EngineConfig::default());
        }
        serde_yaml::from_str(text).context("invalid engine config")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml_str(&text)
    }
}
