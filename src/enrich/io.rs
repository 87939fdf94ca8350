//! I/O metrics facade.

use std::time::Instant;

use crate::enrich::{MetricsConfig, PropertySink, Source};
use crate::sampler::IoSampler;

/// Exposes the process's cumulative I/O counters (and optionally their
/// deltas) for attachment to log events.
///
/// Values read zero on platforms without per-process I/O accounting and
/// when the counters cannot be read; zero never means an error occurred.
pub struct IoMetrics {
    source: Source<IoSampler>,
}

impl IoMetrics {
    pub fn new(config: &MetricsConfig) -> Self {
        Self {
            source: Source::new(IoSampler::new(), config),
        }
    }

    /// Field name/value pairs for one log event: `io_read_bytes`,
    /// `io_write_bytes`, plus the `delta_*` counterparts in delta mode.
    pub fn current_values(&self) -> Vec<(&'static str, i64)> {
        self.current_values_at(Instant::now())
    }

    pub fn current_values_at(&self, now: Instant) -> Vec<(&'static str, i64)> {
        let (current, delta) = self.source.read_at(now);
        let mut values: Vec<(&'static str, i64)> = current
            .fields()
            .iter()
            .map(|&(name, value)| (name, value as i64))
            .collect();
        if let Some(delta) = delta {
            values.extend(delta.fields());
        }
        values
    }

    /// Writes the current values into `sink`, honoring its add-if-absent
    /// semantics.
    pub fn enrich_into(&self, sink: &mut dyn PropertySink) {
        for (name, value) in self.current_values() {
            sink.add_if_absent(name, value);
        }
    }
}
