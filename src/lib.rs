//! proc-metrics-enricher
//!
//! Throttled, cross-platform sampling of the running process's I/O and
//! memory consumption, packaged for per-log-event enrichment. A sampler
//! takes an instantaneous snapshot via the platform's native facilities, a
//! throttled cache bounds sampling overhead by serving the previous
//! snapshot until a minimum interval elapses, and an optional delta tracker
//! reports the change since a fixed or rolling baseline.
//!
//! Sampling never fails: unsupported platforms and unreadable counters
//! produce zero values, so a metric reading zero can mean "unavailable" as
//! well as "idle" — it never means an error reached the caller.
//!
//! # Usage
//!
//! ```rust
//! use proc_metrics_enricher::{IoMetrics, MetricsConfig};
//!
//! let config = MetricsConfig {
//!     min_sample_interval_ms: 1000,
//!     emit_deltas: true,
//!     ..Default::default()
//! };
//! let io = IoMetrics::new(&config);
//!
//! // Once per log event:
//! for (name, value) in io.current_values() {
//!     println!("{name}={value}");
//! }
//! ```

pub mod cache;
pub mod delta;
pub mod enrich;
pub mod sampler;
pub mod snapshot;

// Re-export main types for convenience
pub use cache::{SampleCache, ThrottledCache};
pub use delta::{BaselinePolicy, DeltaTracker};
pub use enrich::{
    IoMetrics, MemoryMetrics, MetricsConfig, PropertySink, StopwatchMetrics, StopwatchPrecision,
};
pub use sampler::{IoSampler, MemorySampler, Sampler};
pub use snapshot::{IoDelta, IoSnapshot, MemoryDelta, MemorySnapshot, Snapshot};
