//! Lifetime resolution counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Internal lock-free counters, mutated only by the client after each
/// resolution.
pub(crate) struct AtomicMetrics {
    remote_calls: AtomicU64,
    cache_hits: AtomicU64,
    local_fallbacks: AtomicU64,
    total_latency_us: AtomicU64,
}

impl AtomicMetrics {
    pub fn new() -> Self {
        Self {
            remote_calls: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            local_fallbacks: AtomicU64::new(0),
            total_latency_us: AtomicU64::new(0),
        }
    }

    pub fn record_cache_hit(&self, latency: Duration) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
        self.add_latency(latency);
    }

    pub fn record_remote(&self, latency: Duration) {
        self.remote_calls.fetch_add(1, Ordering::Relaxed);
        self.add_latency(latency);
    }

    pub fn record_local(&self, latency: Duration) {
        self.local_fallbacks.fetch_add(1, Ordering::Relaxed);
        self.add_latency(latency);
    }

    fn add_latency(&self, latency: Duration) {
        self.total_latency_us
            .fetch_add(latency.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.remote_calls.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.local_fallbacks.store(0, Ordering::Relaxed);
        self.total_latency_us.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self, cache_size: usize) -> MetricsSnapshot {
        let remote_calls = self.remote_calls.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let local_fallbacks = self.local_fallbacks.load(Ordering::Relaxed);
        let total_latency_us = self.total_latency_us.load(Ordering::Relaxed);
        MetricsSnapshot {
            remote_calls,
            cache_hits,
            local_fallbacks,
            cache_size,
            total_lookups: remote_calls + cache_hits + local_fallbacks,
            total_latency_us,
        }
    }
}

/// Owned copy of the counters at one point in time, with derived ratios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub remote_calls: u64,
    pub cache_hits: u64,
    pub local_fallbacks: u64,
    /// Live entries in the cache map when the snapshot was taken.
    pub cache_size: usize,
    /// Successful resolutions across all tiers.
    pub total_lookups: u64,
    total_latency_us: u64,
}

impl MetricsSnapshot {
    /// Share of lookups served without the local fallback:
    /// `(cache_hits + remote_calls) / total_lookups`.
    pub fn success_rate(&self) -> f64 {
        if self.total_lookups == 0 {
            0.0
        } else {
            (self.cache_hits + self.remote_calls) as f64 / self.total_lookups as f64
        }
    }

    /// Mean latency of successful resolutions, in milliseconds.
    pub fn average_latency_ms(&self) -> f64 {
        if self.total_lookups == 0 {
            0.0
        } else {
            self.total_latency_us as f64 / self.total_lookups as f64 / 1000.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_zero_rates() {
        let m = AtomicMetrics::new();
        let snap = m.snapshot(0);
        assert_eq!(snap.total_lookups, 0);
        assert_eq!(snap.success_rate(), 0.0);
        assert_eq!(snap.average_latency_ms(), 0.0);
    }

    #[test]
    fn success_rate_excludes_local_fallbacks() {
        let m = AtomicMetrics::new();
        m.record_cache_hit(Duration::from_millis(1));
        m.record_remote(Duration::from_millis(3));
        m.record_remote(Duration::from_millis(3));
        m.record_local(Duration::from_millis(5));
        let snap = m.snapshot(2);
        assert_eq!(snap.total_lookups, 4);
        assert!((snap.success_rate() - 0.75).abs() < f64::EPSILON);
        assert!((snap.average_latency_ms() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn reset_zeroes_counters() {
        let m = AtomicMetrics::new();
        m.record_remote(Duration::from_millis(2));
        m.reset();
        assert_eq!(m.snapshot(0).total_lookups, 0);
    }
}
