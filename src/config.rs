use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::stats::Stat;

/// Number of randomly drawn highlight stats by default
pub const DEFAULT_RANDOM_HIGHLIGHTS: usize = 2;
/// Self-destructs must exceed this for either player to be highlight-eligible
pub const DEFAULT_SELF_DESTRUCT_THRESHOLD: i64 = 1;

/// Report configuration that mirrors the optional YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub highlights: HighlightConfig,
    /// Seed for the highlight draw; random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Where the JSON report is written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Rules for the short highlight list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    #[serde(default = "default_random_count")]
    pub random_count: usize,
    #[serde(default = "default_self_destruct_threshold")]
    pub self_destruct_threshold: i64,
}

fn default_random_count() -> usize {
    DEFAULT_RANDOM_HIGHLIGHTS
}

fn default_self_destruct_threshold() -> i64 {
    DEFAULT_SELF_DESTRUCT_THRESHOLD
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            random_count: DEFAULT_RANDOM_HIGHLIGHTS,
            self_destruct_threshold: DEFAULT_SELF_DESTRUCT_THRESHOLD,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid highlight configuration: {0}")]
    InvalidHighlights(String),
    #[error("Invalid output configuration: {0}")]
    InvalidOutput(String),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.highlights.random_count > Stat::ALL.len() {
            return Err(ConfigError::InvalidHighlights(format!(
                "random_count {} exceeds the {} available stats",
                self.highlights.random_count,
                Stat::ALL.len()
            )));
        }

        if self.highlights.self_destruct_threshold < 0 {
            return Err(ConfigError::InvalidHighlights(
                "self_destruct_threshold cannot be negative".to_string(),
            ));
        }

        if let Some(output) = &self.output {
            if output.as_os_str().is_empty() {
                return Err(ConfigError::InvalidOutput(
                    "output path cannot be empty".to_string(),
                ));
            }
        }

        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::InvalidLogLevel(level.clone()));
            }
        }

        Ok(())
    }
}
