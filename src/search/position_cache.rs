//! Concurrent position-value cache shared by all search workers.
//!
//! Keyed by the structural hash from `search::zobrist`; two different
//! positions that hash alike share an entry. Each engine search builds its
//! own cache and drops it when the search returns.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::search::board_scoring::Score;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Default)]
pub struct PositionCache {
    values: DashMap<u64, Score>,
    probes: AtomicU64,
    hits: AtomicU64,
    stores: AtomicU64,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self, key: u64) -> Option<Score> {
        self.probes.fetch_add(1, Ordering::Relaxed);
        let value = self.values.get(&key).map(|entry| *entry.value());
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    pub fn store(&self, key: u64, value: Score) {
        self.stores.fetch_add(1, Ordering::Relaxed);
        self.values.insert(key, value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            probes: self.probes.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }
}
