//! CLI arguments for the proc-metrics-enricher demo binary.

use clap::{Parser, ValueEnum};
use proc_metrics_enricher::BaselinePolicy;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Baseline semantics options for CLI parsing
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BaselinePolicyArg {
    Fixed,
    Rolling,
}

impl From<BaselinePolicyArg> for BaselinePolicy {
    fn from(arg: BaselinePolicyArg) -> Self {
        match arg {
            BaselinePolicyArg::Fixed => BaselinePolicy::Fixed,
            BaselinePolicyArg::Rolling => BaselinePolicy::Rolling,
        }
    }
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "proc-metrics-enricher",
    about = "Walks a directory tree, logging each entry with process I/O and memory metrics attached",
    version,
    propagate_version = true
)]
pub struct Args {
    /// Directory tree to walk
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Minimum time between metric resamples, in milliseconds
    #[arg(long)]
    pub min_sample_interval_ms: Option<u64>,

    /// Also emit delta fields alongside absolute values
    #[arg(long)]
    pub emit_deltas: bool,

    /// Baseline semantics for delta fields
    #[arg(long, value_enum)]
    pub baseline_policy: Option<BaselinePolicyArg>,

    /// Report elapsed time with millisecond precision
    #[arg(long)]
    pub precise_stopwatch: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,
}
