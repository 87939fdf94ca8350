//! Memory metrics facade.

use std::time::Instant;

use crate::enrich::{MetricsConfig, PropertySink, Source};
use crate::sampler::MemorySampler;

/// Exposes the process's memory usage (and optionally deltas) for
/// attachment to log events.
pub struct MemoryMetrics {
    source: Source<MemorySampler>,
}

impl MemoryMetrics {
    pub fn new(config: &MetricsConfig) -> Self {
        Self {
            source: Source::new(MemorySampler::new(), config),
        }
    }

    /// Field name/value pairs for one log event: `working_set_bytes`,
    /// `managed_memory_bytes`, `heap_committed_bytes`,
    /// `runtime_committed_bytes`, `total_available_memory_bytes`, plus the
    /// `delta_*` counterparts in delta mode.
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
