use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Cache key namespace helpers
pub struct CacheKey;

impl CacheKey {
    /// Key for the full catalog snapshot
    pub fn catalog() -> String {
        "catalog:all".to_string()
    }

    /// Key for a single country record
    pub fn country(name: &str) -> String {
        format!("country:{}", name.to_lowercase())
    }
}

/// In-process snapshot cache for catalog reads
///
/// Values are stored as serialized JSON bytes, so a cache hit hands every
/// ranking request its own deserialized copy of the catalog: one request
/// can never observe a catalog mutation mid-computation.
pub struct CacheManager {
    l1_cache: moka::future::Cache<String, Vec<u8>>,
}

impl CacheManager {
    /// Create a new cache manager
    pub fn new(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { l1_cache }
    }

    /// Get a value from cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: DeserializeOwned,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.l1_cache.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a cache entry
    pub async fn delete(&self, key: &str) {
        self.l1_cache.invalidate(key).await;
    }

    /// Drop every cached entry
    pub fn invalidate_all(&self) {
        self.l1_cache.invalidate_all();
    }
}
