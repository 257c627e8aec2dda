use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Key-value store with per-key expiry, as consumed by the stats service.
/// An expired entry reads as absent, never as stale-but-valid.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, payload: String, ttl: Duration);
}

/// A cache entry with expiration time
pub struct CacheEntry<T> {
    pub data: T,
    pub expires_at: Instant,
}

/// A generic time-based cache; every write carries its own TTL
pub struct TimedCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone + Send + Sync> TimedCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get a value from the cache if it exists and hasn't expired
    pub async fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        if let Some(entry) = entries.get(key) {
            if Instant::now() < entry.expires_at {
                return Some(entry.data.clone());
            }
        }
        None
    }

    /// Store a value in the cache with the given TTL
    pub async fn set(&self, key: &str, value: T, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                data: value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Remove a specific key from the cache
    #[allow(dead_code)]
    pub async fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(key);
    }

    /// Remove all expired entries from the cache
    #[allow(dead_code)]
    pub async fn cleanup_expired(&self) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
    }
}

impl<T: Clone + Send + Sync> Default for TimedCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for TimedCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache").finish()
    }
}

#[async_trait]
impl CacheStore for TimedCache<String> {
    async fn get(&self, key: &str) -> Option<String> {
        TimedCache::get(self, key).await
    }

    async fn set(&self, key: &str, payload: String, ttl: Duration) {
        TimedCache::set(self, key, payload, ttl).await;
    }
}
