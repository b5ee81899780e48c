//! In-memory caching for crypto records

use cointrack_core::Crypto;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Cached item with expiration
struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

/// Thread-safe cache for crypto records with TTL and max-entry bounds,
/// keyed by backend id
pub struct CryptoCache {
    cryptos: RwLock<HashMap<String, CacheEntry<Crypto>>>,
    default_ttl: Duration,
    max_entries: usize,
}

impl CryptoCache {
    /// Create a new cache with the given TTL and max entry count
    pub fn with_capacity(default_ttl: Duration, max_entries: usize) -> Self {
        Self {
            cryptos: RwLock::new(HashMap::new()),
            default_ttl,
            max_entries,
        }
    }

    /// Create a new cache with the given TTL and the default bound
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_capacity(default_ttl, 500)
    }

    /// Get a crypto from cache if not expired
    pub fn get(&self, id: &str) -> Option<Crypto> {
        let cache = self.cryptos.read().ok()?;
        let entry = cache.get(id)?;

        if entry.is_expired() {
            None
        } else {
            Some(entry.value.clone())
        }
    }

    /// Insert or update a crypto in cache.
    /// Evicts expired entries if at capacity, then the oldest.
    pub fn insert(&self, crypto: Crypto) {
        if let Ok(mut cache) = self.cryptos.write() {
            if cache.len() >= self.max_entries {
                cache.retain(|_, entry| !entry.is_expired());
            }

            if cache.len() >= self.max_entries {
                if let Some(oldest_key) = cache
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| k.clone())
                {
                    cache.remove(&oldest_key);
                }
            }

            let id = crypto.id.clone();
            cache.insert(
                id,
                CacheEntry {
                    value: crypto,
                    inserted_at: Instant::now(),
                    ttl: self.default_ttl,
                },
            );
        }
    }

    /// Remove a crypto from cache (e.g. after its record changed)
    pub fn invalidate(&self, id: &str) {
        if let Ok(mut cache) = self.cryptos.write() {
            cache.remove(id);
        }
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cryptos.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CryptoCache {
    fn default() -> Self {
        // 30 second TTL, max 500 entries
        Self::with_capacity(Duration::from_secs(30), 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn crypto(id: &str) -> Crypto {
        Crypto {
            id: id.to_string(),
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            created_at: "2009-01-03".to_string(),
            active: true,
            current_value: 43250.75,
            full_name: "Bitcoin (BTC)".to_string(),
            age_days: 5000,
        }
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = CryptoCache::default();
        cache.insert(crypto("17"));

        assert!(cache.get("17").is_some());
        assert!(cache.get("18").is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = CryptoCache::new(Duration::from_millis(1));
        cache.insert(crypto("17"));
        sleep(Duration::from_millis(10));

        assert!(cache.get("17").is_none());
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let cache = CryptoCache::with_capacity(Duration::from_secs(60), 2);
        cache.insert(crypto("1"));
        sleep(Duration::from_millis(2));
        cache.insert(crypto("2"));
        sleep(Duration::from_millis(2));
        cache.insert(crypto("3"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("1").is_none());
        assert!(cache.get("3").is_some());
    }

    #[test]
    fn test_invalidate() {
        let cache = CryptoCache::default();
        cache.insert(crypto("17"));
        cache.invalidate("17");

        assert!(cache.is_empty());
    }
}
