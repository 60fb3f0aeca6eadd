//! Report caching with content-hash keys and bounded memory.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tradelens_core::Fingerprint;

use crate::report::ReportData;

struct Entry {
    report: ReportData,
    inserted_at: Instant,
    last_access: Instant,
}

/// Bounded, TTL-expiring cache for assembled reports.
///
/// Keyed by [`Fingerprint`] (content hash of the filtered trade set), so a
/// cache hit means the underlying trades are byte-identical and the report
/// can be reused verbatim. Owned by the caller and passed where needed;
/// there is no global instance.
pub struct AnalysisCache {
    entries: HashMap<Fingerprint, Entry>,
    capacity: usize,
    ttl: Duration,
}

impl AnalysisCache {
    /// Creates a cache holding at most `capacity` reports, each valid for
    /// `ttl` after insertion.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            ttl,
        }
    }

    /// Checks whether a live entry exists for the fingerprint.
    pub fn contains(&self, key: &Fingerprint) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.inserted_at.elapsed() < self.ttl)
    }

    /// Retrieves a cached report, refreshing its recency.
    ///
    /// Returns `None` on a miss or when the entry has expired; expired
    /// entries are dropped on access.
    pub fn get(&mut self, key: &Fingerprint) -> Option<&ReportData> {
        let expired = self.entries.get(key)?.inserted_at.elapsed() >= self.ttl;
        if expired {
            self.entries.remove(key);
            return None;
        }
        let entry = self.entries.get_mut(key)?;
        entry.last_access = Instant::now();
        Some(&entry.report)
    }

    /// Stores a report, evicting the least-recently-used entry if the
    /// cache is full.
    pub fn put(&mut self, key: Fingerprint, report: ReportData) {
        if self.capacity == 0 {
            return;
        }
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        let now = Instant::now();
        self.entries.insert(
            key,
            Entry {
                report,
                inserted_at: now,
                last_access: now,
            },
        );
    }

    /// Removes an entry from the cache.
    pub fn remove(&mut self, key: &Fingerprint) {
        self.entries.remove(key);
    }

    /// Clears all cached reports.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops every expired entry.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, e| e.inserted_at.elapsed() < ttl);
    }

    /// Returns the number of entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_access)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}
