//! Throttled caching of metric snapshots.
//!
//! A cache serves the previously captured snapshot until a configured
//! minimum interval has elapsed, then resamples exactly once. The whole
//! check-and-possibly-resample-and-read sequence runs under one mutex per
//! cache instance, so concurrent readers observe a linearizable sequence of
//! snapshots and at most one resample happens per staleness window.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::sampler::Sampler;

/// Unsynchronized cache core: the last snapshot, its capture marker, and
/// the throttle interval. Callers that need concurrent access wrap this in
/// [`ThrottledCache`] (or their own gate).
pub struct SampleCache<S: Sampler> {
    sampler: S,
    last: S::Output,
    last_at: Instant,
    min_interval: Duration,
}

impl<S: Sampler> SampleCache<S> {
    /// Takes an immediate first sample, stamped with the current time.
    pub fn new(sampler: S, min_interval: Duration) -> Self {
        Self::new_at(sampler, min_interval, Instant::now())
    }

    /// Takes an immediate first sample, stamped with `now`. Exists so tests
    /// can drive the clock with `Instant` arithmetic.
    pub fn new_at(sampler: S, min_interval: Duration, now: Instant) -> Self {
        let last = sampler.sample();
        Self {
            sampler,
            last,
            last_at: now,
            min_interval,
        }
    }

    /// Returns the cached snapshot, resampling first if the interval has
    /// elapsed. The stale-to-fresh transition (resample plus marker update)
    /// is a single step; a zero interval means every read resamples.
    pub fn read_at(&mut self, now: Instant) -> S::Output {
        if now.saturating_duration_since(self.last_at) >= self.min_interval {
            self.last = self.sampler.sample();
            self.last_at = now;
        }
        self.last
    }

    /// The snapshot captured most recently, without a staleness check.
    pub fn last(&self) -> S::Output {
        self.last
    }
}

/// Thread-safe throttled cache: one exclusive gate per instance.
///
/// Independent caches never contend with each other. A reader that panics
/// while holding the gate does not wedge later readers: the poisoned lock
/// is recovered, since a stale snapshot is preferable to a dead logging
/// pipeline.
pub struct ThrottledCache<S: Sampler> {
    inner: Mutex<SampleCache<S>>,
}

impl<S: Sampler> ThrottledCache<S> {
    pub fn new(sampler: S, min_interval: Duration) -> Self {
        Self::new_at(sampler, min_interval, Instant::now())
    }

    pub fn new_at(sampler: S, min_interval: Duration, now: Instant) -> Self {
        Self {
            inner: Mutex::new(SampleCache::new_at(sampler, min_interval, now)),
        }
    }

    /// Reads the current snapshot, resampling if stale.
    pub fn read(&self) -> S::Output {
        self.read_at(Instant::now())
    }

    /// As [`ThrottledCache::read`], with an explicit timestamp for tests.
    pub fn read_at(&self, now: Instant) -> S::Output {
        let mut cache = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.read_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::IoSnapshot;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    /// Returns counters that grow by 100 read bytes per underlying sample
    /// and counts how often it was invoked.
    struct CountingSampler {
        calls: Arc<AtomicU64>,
    }

    impl Sampler for CountingSampler {
        type Output = IoSnapshot;

        fn sample(&self) -> IoSnapshot {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            IoSnapshot {
                read_bytes: n * 100,
                write_bytes: n * 10,
            }
        }
    }

    fn counting(calls: &Arc<AtomicU64>) -> CountingSampler {
        CountingSampler {
            calls: Arc::clone(calls),
        }
    }

    #[test]
    fn test_fresh_cache_serves_cached_snapshot() {
        let calls = Arc::new(AtomicU64::new(0));
        let t0 = Instant::now();
        let cache = ThrottledCache::new_at(counting(&calls), Duration::from_secs(1), t0);

        // Both reads fall inside the first staleness window.
        let a = cache.read_at(t0);
        let b = cache.read_at(t0 + Duration::from_millis(500));

        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1); // construction only
    }

    #[test]
    fn test_stale_cache_resamples_once() {
        let calls = Arc::new(AtomicU64::new(0));
        let t0 = Instant::now();
        let cache = ThrottledCache::new_at(counting(&calls), Duration::from_secs(1), t0);

        let stale = cache.read_at(t0 + Duration::from_millis(1500));
        assert_eq!(stale.read_bytes, 200);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // The resample moved the capture marker: the window restarts.
        let fresh = cache.read_at(t0 + Duration::from_millis(1600));
        assert_eq!(fresh, stale);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_zero_interval_disables_caching() {
        let calls = Arc::new(AtomicU64::new(0));
        let t0 = Instant::now();
        let cache = ThrottledCache::new_at(counting(&calls), Duration::ZERO, t0);

        let a = cache.read_at(t0);
        let b = cache.read_at(t0);
        let c = cache.read_at(t0);

        assert_eq!(a.read_bytes, 200);
        assert_eq!(b.read_bytes, 300);
        assert_eq!(c.read_bytes, 400);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_interval_never_reached_keeps_first_sample() {
        let calls = Arc::new(AtomicU64::new(0));
        let t0 = Instant::now();
        let cache = ThrottledCache::new_at(counting(&calls), Duration::from_secs(3600), t0);

        for ms in [0u64, 10, 20, 500, 900] {
            let snapshot = cache.read_at(t0 + Duration::from_millis(ms));
            assert_eq!(snapshot.read_bytes, 100);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clock_going_backwards_counts_as_fresh() {
        let calls = Arc::new(AtomicU64::new(0));
        let t0 = Instant::now() + Duration::from_secs(10);
        let cache = ThrottledCache::new_at(counting(&calls), Duration::from_secs(1), t0);

        // An earlier timestamp saturates to zero elapsed time.
        let snapshot = cache.read_at(t0 - Duration::from_secs(5));
        assert_eq!(snapshot.read_bytes, 100);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
