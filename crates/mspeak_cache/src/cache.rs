//! Thread-safe LRU cache with per-entry TTL.

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::key::CacheKey;

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Entry<V> {
    pub(crate) value: V,
    pub(crate) inserted_at_ms: u64,
    pub(crate) ttl_ms: u64,
}

impl<V> Entry<V> {
    pub(crate) fn is_expired(&self, now: u64) -> bool {
        // An entry from the future means the clock went backwards.
        self.inserted_at_ms > now || now - self.inserted_at_ms >= self.ttl_ms
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub expirations: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    expirations: AtomicU64,
}

/// Process-wide result cache shared by every session.
///
/// The lock is only held for map operations, never while a value is being
/// computed. Two callers missing on the same key may both compute; the last
/// one to insert wins.
pub struct ResultCache<V> {
    pub(crate) entries: Mutex<LruCache<CacheKey, Entry<V>>>,
    ttl: Duration,
    counters: Counters,
}

impl<V: Clone> ResultCache<V> {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            counters: Counters::default(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    /// Fresh value for `key`, if any. Expired entries are dropped on access.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let now = now_ms();
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
            self.counters.expirations.fetch_add(1, Ordering::Relaxed);
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn insert(&self, key: CacheKey, value: V) {
        self.insert_with_ttl(key, value, self.ttl);
    }

    pub fn insert_with_ttl(&self, key: CacheKey, value: V, ttl: Duration) {
        let entry = Entry {
            value,
            inserted_at_ms: now_ms(),
            ttl_ms: ttl.as_millis() as u64,
        };
        self.put_entry(key, entry);
        self.counters.insertions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn put_entry(&self, key: CacheKey, entry: Entry<V>) {
        if let Some((evicted, _)) = self.entries.lock().push(key, entry) {
            if evicted != key {
                tracing::trace!(key = %evicted, "evicted least recently used entry");
            }
        }
    }

    /// Cached value for `key`, or the result of `compute` (which is then
    /// stored). The flag is `true` on a hit.
    pub fn get_or_compute<F>(&self, key: CacheKey, compute: F) -> (V, bool)
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return (value, true);
        }
        let value = compute();
        self.insert(key, value.clone());
        (value, false)
    }

    /// Like [`get_or_compute`](Self::get_or_compute); errors are returned
    /// and never cached.
    pub fn try_get_or_compute<E, F>(&self, key: CacheKey, compute: F) -> Result<(V, bool), E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok((value, true));
        }
        let value = compute()?;
        self.insert(key, value.clone());
        Ok((value, false))
    }

    pub fn remove(&self, key: &CacheKey) -> Option<V> {
        self.entries.lock().pop(key).map(|e| e.value)
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, expired ones included until they are
    /// touched or purged.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = now_ms();
        let mut entries = self.entries.lock();
        let expired: Vec<CacheKey> = entries
            .iter()
            .filter(|(_, e)| e.is_expired(now))
            .map(|(k, _)| *k)
            .collect();
        for key in &expired {
            entries.pop(key);
        }
        self.counters
            .expirations
            .fetch_add(expired.len() as u64, Ordering::Relaxed);
        expired.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            insertions: self.counters.insertions.load(Ordering::Relaxed),
            expirations: self.counters.expirations.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
