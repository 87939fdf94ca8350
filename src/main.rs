//! proc-metrics-enricher demo binary.
//!
//! Walks a directory tree and emits one structured log event per entry,
//! enriched with the process's throttled I/O and memory metrics. This is
//! glue around the library: all sampling, caching, and delta semantics live
//! in `proc_metrics_enricher`.

mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, Level};

use cli::{Args, LogLevel};
use config::resolve_metrics_config;
use proc_metrics_enricher::{
    IoMetrics, MemoryMetrics, PropertySink, StopwatchMetrics, StopwatchPrecision,
};

/// Initializes tracing logging subsystem with configured log level.
fn setup_logging(args: &Args) {
    let log_level = match args.log_level {
        LogLevel::Off => Level::ERROR,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Property set for one log event. Implements the add-if-absent attachment
/// semantics the facades expect: a field set earlier wins.
#[derive(Default)]
struct EventProperties {
    values: BTreeMap<&'static str, i64>,
}

impl PropertySink for EventProperties {
    fn add_if_absent(&mut self, name: &'static str, value: i64) {
        self.values.entry(name).or_insert(value);
    }
}

impl fmt::Display for EventProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.values {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

struct Enrichers {
    io: IoMetrics,
    memory: MemoryMetrics,
    stopwatch: StopwatchMetrics,
}

impl Enrichers {
    fn log_entry(&self, path: &Path) {
        let mut properties = EventProperties::default();
        self.io.enrich_into(&mut properties);
        self.memory.enrich_into(&mut properties);
        self.stopwatch.enrich_into(&mut properties);

        info!(path = %path.display(), %properties, "visited");
    }
}

/// Recursively walks `dir`, logging one enriched event per entry.
/// Unreadable directories are skipped, not fatal. Returns the entry count.
fn walk(dir: &Path, enrichers: &Enrichers) -> u64 {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("skipping {}: {}", dir.display(), e);
            return 0;
        }
    };

    let mut visited = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        enrichers.log_entry(&path);
        visited += 1;

        // Don't follow symlinks; a link cycle would never terminate.
        if path.is_dir() && !path.is_symlink() {
            visited += walk(&path, enrichers);
        }
    }
    visited
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args);

    let config = resolve_metrics_config(&args)?;
    if args.show_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let precision = if args.precise_stopwatch {
        StopwatchPrecision::Milliseconds
    } else {
        StopwatchPrecision::Seconds
    };
    let enrichers = Enrichers {
        io: IoMetrics::new(&config),
        memory: MemoryMetrics::new(&config),
        stopwatch: StopwatchMetrics::new(precision),
    };

    info!(
        root = %args.root.display(),
        min_sample_interval_ms = config.min_sample_interval_ms,
        emit_deltas = config.emit_deltas,
        "starting directory walk"
    );

    let visited = walk(&args.root, &enrichers);
    info!(visited, "directory walk complete");

    Ok(())
}
