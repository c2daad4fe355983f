//! 계층형 폴백 조회 클라이언트: 캐시 → 원격 API → 로컬 데이터셋.
//!
//! The tiered-fallback client. `get()` resolves a date through three tiers in
//! strict order, short-circuiting on the first success: the in-memory cache,
//! the remote API under a hard deadline, and the lazily loaded local dataset.

use crate::clock::{Clock, SystemClock};
use crate::config::{ClientConfig, ConfigPatch};
use crate::local::LocalDatasetProvider;
use crate::metrics::{AtomicMetrics, MetricsSnapshot};
use crate::remote::RemoteFetcher;
use crate::store::FifoStore;
use crate::types::{CalendarDay, RawCalendarRecord, Source};
use crate::{DateKey, Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// One-shot view of the client's state, mirroring the original client's
/// status report.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub config: ClientConfig,
    pub metrics: MetricsSnapshot,
    /// Whether the fallback dataset has been loaded this session.
    pub dataset_loaded: bool,
}

/// Read-through manseryeok lookup client.
///
/// Owned explicitly by the application's composition root and passed by
/// reference to consumers; independent instances share nothing, so tests can
/// run any number of them side by side.
pub struct ManseryeokClient {
    config: RwLock<ClientConfig>,
    store: FifoStore,
    metrics: AtomicMetrics,
    remote: Arc<dyn RemoteFetcher>,
    local: Arc<dyn LocalDatasetProvider>,
    dataset: OnceCell<Arc<HashMap<String, RawCalendarRecord>>>,
    clock: Arc<dyn Clock>,
}

impl ManseryeokClient {
    /// Build a client. The configuration is validated eagerly, the same way
    /// a later [`update_config`](Self::update_config) would be.
    pub fn new(
        config: ClientConfig,
        remote: Arc<dyn RemoteFetcher>,
        local: Arc<dyn LocalDatasetProvider>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: RwLock::new(config),
            store: FifoStore::new(),
            metrics: AtomicMetrics::new(),
            remote,
            local,
            dataset: OnceCell::new(),
            clock: Arc::new(SystemClock),
        })
    }

    /// Swap the monotonic clock. Intended for deterministic TTL tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Resolve one date to a calendar record.
    ///
    /// Tier failures (remote timeout or error, malformed payloads, a failed
    /// dataset load) are logged and recovered here; the only error a caller
    /// sees is [`Error::NotFound`] when every tier comes up empty.
    pub async fn get(&self, key: DateKey) -> Result<CalendarDay> {
        let started = self.clock.now();
        let canonical = key.canonical();
        let cfg = self.config.read().unwrap().clone();

        // Tier 1: in-memory cache.
        if cfg.cache_enabled {
            if let Some(record) = self.store.get(&canonical, self.clock.now()) {
                self.metrics.record_cache_hit(self.elapsed_since(started));
                debug!(key = %canonical, "cache hit");
                return Ok(record.with_source(Source::Cache));
            }
        }

        // Tier 2: remote API under the configured deadline.
        match self.fetch_remote(&cfg, &key).await {
            Ok(day) => {
                if cfg.cache_enabled {
                    self.store.insert(
                        canonical.clone(),
                        day.clone(),
                        cfg.cache_ttl,
                        self.clock.now(),
                        cfg.max_entries,
                    );
                }
                self.metrics.record_remote(self.elapsed_since(started));
                debug!(key = %canonical, "resolved via remote API");
                return Ok(day);
            }
            Err(err) => {
                warn!(key = %canonical, error = %err, "remote tier failed, falling back");
            }
        }

        // Tier 3: local dataset, loaded at most once per instance.
        if let Some(day) = self.lookup_local(&canonical).await {
            if cfg.cache_enabled {
                self.store.insert(
                    canonical.clone(),
                    day.clone(),
                    cfg.cache_ttl,
                    self.clock.now(),
                    cfg.max_entries,
                );
            }
            self.metrics.record_local(self.elapsed_since(started));
            debug!(key = %canonical, "resolved via local dataset");
            return Ok(day);
        }

        Err(Error::NotFound { key: canonical })
    }

    async fn fetch_remote(&self, cfg: &ClientConfig, key: &DateKey) -> Result<CalendarDay> {
        let fetch = self.remote.fetch(&cfg.remote_endpoint, key);
        // Dropping the fetch future on deadline expiry aborts the underlying
        // request; nothing keeps running past the timeout.
        let raw = match tokio::time::timeout(cfg.timeout, fetch).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::Timeout {
                    ms: cfg.timeout.as_millis() as u64,
                })
            }
        };
        raw.normalize(Source::Remote)
    }

    async fn lookup_local(&self, canonical: &str) -> Option<CalendarDay> {
        // Single-flight load: concurrent callers await the same in-flight
        // attempt instead of starting their own. A failed attempt settles
        // nothing, so a later call may retry.
        let dataset = match self
            .dataset
            .get_or_try_init(|| async { self.local.load().await.map(Arc::new) })
            .await
        {
            Ok(dataset) => Arc::clone(dataset),
            Err(err) => {
                warn!(error = %err, "local dataset unavailable");
                return None;
            }
        };

        let raw = dataset.get(canonical)?;
        match raw.normalize(Source::Local) {
            Ok(day) => Some(day),
            Err(err) => {
                warn!(key = %canonical, error = %err, "discarding malformed local record");
                None
            }
        }
    }

    fn elapsed_since(&self, started: std::time::Instant) -> Duration {
        self.clock.now().saturating_duration_since(started)
    }

    /// Owned snapshot of the lifetime counters. No side effects.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.store.len())
    }

    /// Zero the counters. Cache content is untouched.
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Empty the cache map. Metrics and the loaded dataset are
    /// process-lifetime facts and survive. Idempotent.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Validate and merge a partial configuration update. Takes effect for
    /// subsequent `get()` calls only; entries already cached keep the TTL
    /// they were stored with. An invalid patch leaves everything unchanged.
    pub fn update_config(&self, patch: ConfigPatch) -> Result<()> {
        let mut config = self.config.write().unwrap();
        let merged = patch.merged_into(&config);
        merged.validate()?;
        *config = merged;
        Ok(())
    }

    pub fn config(&self) -> ClientConfig {
        self.config.read().unwrap().clone()
    }

    pub fn status_report(&self) -> StatusReport {
        StatusReport {
            config: self.config(),
            metrics: self.metrics(),
            dataset_loaded: self.dataset.initialized(),
        }
    }
}
