//! Configuration loading and merging for the demo binary.
//!
//! Supports YAML, JSON, and TOML config files, selected by extension.
//! Precedence: CLI arguments > config file > built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cli::Args;
use proc_metrics_enricher::{BaselinePolicy, MetricsConfig};

/// Errors raised while loading or parsing a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {format} config {path}: {message}")]
    Parse {
        format: &'static str,
        path: String,
        message: String,
    },

    #[error("unsupported config extension {0:?} (expected yaml, yml, json or toml)")]
    UnknownFormat(String),
}

/// File-level configuration. Every field is optional so the file only has
/// to name the options it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_sample_interval_ms: Option<u64>,
    pub emit_deltas: Option<bool>,
    pub baseline_policy: Option<BaselinePolicy>,
}

/// Loads a config file, choosing the parser by file extension.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            format: "YAML",
            path: path.display().to_string(),
            message: e.to_string(),
        }),
        "json" => serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            format: "JSON",
            path: path.display().to_string(),
            message: e.to_string(),
        }),
        "toml" => toml::from_str(&content).map_err(|e| ConfigError::Parse {
            format: "TOML",
            path: path.display().to_string(),
            message: e.to_string(),
        }),
        other => Err(ConfigError::UnknownFormat(other.to_string())),
    }
}

/// Resolves the effective metrics configuration (CLI > file > defaults).
pub fn resolve_metrics_config(args: &Args) -> Result<MetricsConfig, ConfigError> {
    let file = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    let defaults = MetricsConfig::default();
    Ok(MetricsConfig {
        min_sample_interval_ms: args
            .min_sample_interval_ms
            .or(file.min_sample_interval_ms)
            .unwrap_or(defaults.min_sample_interval_ms),
        emit_deltas: args.emit_deltas || file.emit_deltas.unwrap_or(defaults.emit_deltas),
        baseline_policy: args
            .baseline_policy
            .map(BaselinePolicy::from)
            .or(file.baseline_policy)
            .unwrap_or(defaults.baseline_policy),
    })
}
