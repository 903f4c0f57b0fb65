//! Lookup result cache
//!
//! Results are stored as JSON under the queried name (or address) and
//! expire after a fixed TTL. A failed cache write never fails the lookup.

use crate::{Error, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use web3ns_params::LOOKUP_CACHE_TTL_SECS;

/// Key-value store with per-entry expiry
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch a live value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value that expires after `ttl`
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
}

/// In-process [`KvStore`]; expired entries are dropped when read and swept
/// on every write
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryKvStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some((value, expires_at)) if Instant::now() < *expires_at => {
                return Ok(Some(value.clone()))
            }
            Some(_) => {}
            None => return Ok(None),
        }

        entries.remove(key);
        Ok(None)
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .ok_or_else(|| Error::Cache(format!("TTL {:?} is out of range", ttl)))?;

        let mut entries = self.entries.lock();
        entries.retain(|_, (_, expires)| *expires > now);
        entries.insert(key.to_string(), (value, expires_at));
        Ok(())
    }
}

/// Read-through cache in front of a lookup
#[derive(Clone)]
pub struct LookupCache {
    store: Arc<dyn KvStore>,
    ttl: Duration,
}

impl LookupCache {
    /// Cache with the default five-minute TTL
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_ttl(store, Duration::from_secs(LOOKUP_CACHE_TTL_SECS))
    }

    /// Cache with a custom TTL
    pub fn with_ttl(store: Arc<dyn KvStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Return the cached value for `key`, or run `lookup` and cache its result.
    ///
    /// Failed lookups are not cached.
    pub async fn execute<T, F>(&self, key: &str, lookup: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T>>,
    {
        if let Some(cached) = self.store.get(key).await? {
            match serde_json::from_str(&cached) {
                Ok(value) => {
                    debug!("Cache hit for {}", key);
                    return Ok(value);
                }
                Err(e) => warn!("Discarding unreadable cache entry for {}: {}", key, e),
            }
        }

        let value = lookup.await?;

        let json = serde_json::to_string(&value)?;
        if let Err(e) = self.store.put(key, json, self.ttl).await {
            warn!("Failed to cache lookup for {}: {}", key, e);
        }

        Ok(value)
    }
}
