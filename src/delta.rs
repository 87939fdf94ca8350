//! Baseline-relative delta tracking over a throttled cache.
//!
//! A tracker remembers a baseline snapshot and reports the field-wise
//! difference between the current snapshot and that baseline. Whether the
//! baseline stays fixed or rolls forward after every read is an explicit
//! construction-time choice; the two policies produce materially different
//! delta series and neither is picked silently.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::cache::SampleCache;
use crate::sampler::Sampler;
use crate::snapshot::Snapshot;

/// Which reference point deltas are computed against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselinePolicy {
    /// Baseline is the construction-time sample and never changes; deltas
    /// grow with cumulative usage since start.
    Fixed,
    /// Baseline is reset to the just-read snapshot after every delta
    /// computation; deltas cover only the change since the previous read.
    #[default]
    Rolling,
}

struct DeltaState<S: Sampler> {
    cache: SampleCache<S>,
    baseline: S::Output,
}

/// Delta tracker over a throttled sample cache.
///
/// The cache state and the baseline live behind a single gate, so a rolling
/// baseline update is never interleaved with another caller's read. The
/// resample decision itself belongs entirely to the cache core; this layer
/// adds no throttling of its own.
pub struct DeltaTracker<S: Sampler> {
    policy: BaselinePolicy,
    inner: Mutex<DeltaState<S>>,
}

impl<S: Sampler> DeltaTracker<S> {
    /// Takes an immediate first sample and uses it as the initial baseline.
    pub fn new(sampler: S, min_interval: Duration, policy: BaselinePolicy) -> Self {
        Self::new_at(sampler, min_interval, policy, Instant::now())
    }

    pub fn new_at(
        sampler: S,
        min_interval: Duration,
        policy: BaselinePolicy,
        now: Instant,
    ) -> Self {
        let cache = SampleCache::new_at(sampler, min_interval, now);
        let baseline = cache.last();
        Self {
            policy,
            inner: Mutex::new(DeltaState { cache, baseline }),
        }
    }

    /// Reads the current snapshot and its delta against the baseline.
    pub fn read_with_delta(&self) -> (S::Output, <S::Output as Snapshot>::Delta) {
        self.read_with_delta_at(Instant::now())
    }

    /// As [`DeltaTracker::read_with_delta`], with an explicit timestamp.
    pub fn read_with_delta_at(&self, now: Instant) -> (S::Output, <S::Output as Snapshot>::Delta) {
        let mut state = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let current = state.cache.read_at(now);
        let delta = current.delta_since(&state.baseline);
        if self.policy == BaselinePolicy::Rolling {
            state.baseline = current;
        }
        (current, delta)
    }
}
