//! Process-lifetime cache of enrichment records.

use crate::domain::holding::Enrichment;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub ticker: String,
    pub quarter_end: NaiveDate,
}

impl CacheKey {
    pub fn new(ticker: &str, quarter_end: NaiveDate) -> Self {
        Self {
            ticker: ticker.trim().to_ascii_uppercase(),
            quarter_end,
        }
    }
}

/// Injected into the fetcher. Concurrent misses on one key may both compute; the
/// later `put` wins.
pub trait EnrichmentCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Enrichment>;
    fn put(&self, key: CacheKey, value: Enrichment);
    fn clear(&self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemoryEnrichmentCache {
    map: Mutex<HashMap<CacheKey, Enrichment>>,
}

impl InMemoryEnrichmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Enrichment>> {
        // A panic while holding the lock cannot leave a half-written entry behind.
        self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EnrichmentCache for InMemoryEnrichmentCache {
    fn get(&self, key: &CacheKey) -> Option<Enrichment> {
        self.lock().get(key).cloned()
    }

    fn put(&self, key: CacheKey, value: Enrichment) {
        self.lock().insert(key, value);
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
