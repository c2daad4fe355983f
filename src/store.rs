//! Bounded in-memory store with FIFO eviction and lazy TTL expiry.
//!
//! Insertion order is tracked in an explicit queue rather than relying on map
//! iteration order, so "oldest inserted" is well defined on any map
//! implementation. Expired entries are purged on lookup; there is no
//! background sweep.

use crate::CalendarDay;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry {
    record: CalendarDay,
    stored_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > self.ttl
    }
}

struct Inner {
    entries: HashMap<String, Entry>,
    order: VecDeque<String>,
}

/// Guarded with a mutex: two concurrent `get()` calls on a multi-threaded
/// runtime would otherwise interleave the eviction bookkeeping.
pub(crate) struct FifoStore {
    inner: Mutex<Inner>,
}

impl FifoStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Look up a key, purging it if expired. Returns a clone of the record.
    pub fn get(&self, key: &str, now: Instant) -> Option<CalendarDay> {
        let mut inner = self.inner.lock().unwrap();
        match inner.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.record.clone()),
            Some(_) => {}
            None => return None,
        }
        inner.entries.remove(key);
        inner.order.retain(|k| k != key);
        None
    }

    /// Insert a record, maintaining the size bound after this single insert.
    /// Re-inserting an existing key refreshes it and moves it to the back of
    /// the FIFO order.
    pub fn insert(&self, key: String, record: CalendarDay, ttl: Duration, now: Instant, max_entries: usize) {
        let mut inner = self.inner.lock().unwrap();
        if inner.entries.contains_key(&key) {
            inner.order.retain(|k| k != &key);
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            Entry {
                record,
                stored_at: now,
                ttl,
            },
        );
        // The order queue tracks the map exactly (purges also drop their
        // queue slot), so one pop evicts one live entry.
        while inner.entries.len() > max_entries {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str, now: Instant) -> bool {
        let inner = self.inner.lock().unwrap();
        inner
            .entries
            .get(key)
            .map(|e| !e.is_expired(now))
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.order.clear();
    }
}
