//! In-memory price cache with age-bounded reads.
//!
//! Entries are never evicted; staleness is decided at read time so the
//! rate-limit fallback path can still `peek` at expired data.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use super::bitcoin_model::{HistoricalPoint, PriceSnapshot};

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

/// String-keyed cache where the freshness window is supplied per read.
pub struct TtlCache<T: Clone> {
    entries: DashMap<String, CacheEntry<T>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns the value if an entry exists and is younger than `max_age`.
    /// Absence and staleness are indistinguishable; both are a miss.
    pub fn get(&self, key: &str, max_age: Duration) -> Option<T> {
        self.entries.get(key).and_then(|entry| {
            if entry.stored_at.elapsed() < max_age {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    /// Unconditionally overwrites, stamping the current time.
    pub fn set(&self, key: &str, value: T) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Age-ignoring read, used only on upstream-failure fallback paths.
    pub fn peek(&self, key: &str) -> Option<T> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The cache pair held by the price service: a single snapshot slot and
/// one series entry per distinct clamped day-count.
///
/// Constructed at process start and injected into the service; nothing
/// survives a restart.
pub struct PriceCache {
    pub snapshot: TtlCache<PriceSnapshot>,
    pub history: TtlCache<Vec<HistoricalPoint>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self {
            snapshot: TtlCache::new(),
            history: TtlCache::new(),
        }
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_within_window() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("k", 42);

        assert_eq!(cache.get("k", Duration::from_secs(60)), Some(42));
    }

    #[test]
    fn test_missing_key_is_a_miss() {
        let cache: TtlCache<u32> = TtlCache::new();

        assert_eq!(cache.get("absent", Duration::from_secs(60)), None);
        assert_eq!(cache.peek("absent"), None);
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("k", 42);

        // A zero window can never satisfy `elapsed < max_age`.
        assert_eq!(cache.get("k", Duration::ZERO), None);
    }

    #[test]
    fn test_peek_ignores_age() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("k", 42);

        assert_eq!(cache.get("k", Duration::ZERO), None);
        assert_eq!(cache.peek("k"), Some(42));
    }

    #[test]
    fn test_set_overwrites_and_restamps() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("k", 1);
        std::thread::sleep(Duration::from_millis(10));
        cache.set("k", 2);

        assert_eq!(cache.get("k", Duration::from_millis(9)), Some(2));
        assert_eq!(cache.len(), 1);
    }
}
