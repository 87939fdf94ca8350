//! Elapsed-time facade.

use std::time::Instant;

use crate::enrich::PropertySink;

/// Reporting precision for [`StopwatchMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchPrecision {
    Seconds,
    Milliseconds,
}

/// Reports wall-clock time elapsed since construction.
pub struct StopwatchMetrics {
    started: Instant,
    precision: StopwatchPrecision,
}

impl StopwatchMetrics {
    pub fn new(precision: StopwatchPrecision) -> Self {
        Self::new_at(precision, Instant::now())
    }

    pub fn new_at(precision: StopwatchPrecision, now: Instant) -> Self {
        Self {
            started: now,
            precision,
        }
    }

    pub fn current_values(&self) -> Vec<(&'static str, i64)> {
        self.current_values_at(Instant::now())
    }

    pub fn current_values_at(&self, now: Instant) -> Vec<(&'static str, i64)> {
        let elapsed = now.saturating_duration_since(self.started);
        match self.precision {
            StopwatchPrecision::Seconds => vec![("elapsed_seconds", elapsed.as_secs() as i64)],
            StopwatchPrecision::Milliseconds => {
                vec![("elapsed_millis", elapsed.as_millis() as i64)]
            }
        }
    }

    pub fn enrich_into(&self, sink: &mut dyn PropertySink) {
        for (name, value) in self.current_values() {
            sink.add_if_absent(name, value);
        }
    }
}
