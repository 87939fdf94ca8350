//! Metric source facades consumed by log-event enrichment callbacks.
//!
//! Each facade composes a platform sampler, a throttled cache, and
//! optionally a delta tracker, and exposes the field values to attach to a
//! single log event. Facades hold no logging-framework types; the attachment
//! boundary is the [`PropertySink`] trait.

mod io;
mod memory;
mod stopwatch;

pub use io::IoMetrics;
pub use memory::MemoryMetrics;
pub use stopwatch::{StopwatchMetrics, StopwatchPrecision};

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::cache::ThrottledCache;
use crate::delta::{BaselinePolicy, DeltaTracker};
use crate::sampler::Sampler;
use crate::snapshot::Snapshot;

/// Destination for enrichment fields, mirroring the logging framework's
/// "set property if not already present" semantics. A field the event
/// already carries is never overwritten.
pub trait PropertySink {
    fn add_if_absent(&mut self, name: &'static str, value: i64);
}

/// Options shared by the metric facades.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Minimum real time between two underlying samples, in milliseconds.
    /// Zero disables throttling: every read resamples.
    pub min_sample_interval_ms: u64,

    /// Also compute and expose `delta_*` fields.
    pub emit_deltas: bool,

    /// Baseline semantics when deltas are enabled.
    pub baseline_policy: BaselinePolicy,
}

impl MetricsConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_sample_interval_ms)
    }
}

/// Shared plumbing behind the facades: a plain throttled cache, or a delta
/// tracker when delta mode is on.
pub(crate) enum Source<S: Sampler> {
    Plain(ThrottledCache<S>),
    Delta(DeltaTracker<S>),
}

impl<S: Sampler> Source<S> {
    pub(crate) fn new(sampler: S, config: &MetricsConfig) -> Self {
        if config.emit_deltas {
            Source::Delta(DeltaTracker::new(
                sampler,
                config.min_interval(),
                config.baseline_policy,
            ))
        } else {
            Source::Plain(ThrottledCache::new(sampler, config.min_interval()))
        }
    }

    pub(crate) fn read_at(
        &self,
        now: Instant,
    ) -> (S::Output, Option<<S::Output as Snapshot>::Delta>) {
        match self {
            Source::Plain(cache) => (cache.read_at(now), None),
            Source::Delta(tracker) => {
                let (current, delta) = tracker.read_with_delta_at(now);
                (current, Some(delta))
            }
        }
    }
}
