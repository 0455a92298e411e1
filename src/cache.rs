//! Snapshot cache: the store contract plus the bundled in-memory
//! implementation.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::WeatherError;
use crate::types::WeatherSnapshot;

/// Key-value store with TTL semantics for weather snapshots.
///
/// Implementations provide their own concurrency safety. Callers compose
/// read-then-write around this contract, so two concurrent misses for the
/// same key may both fetch upstream; the second write wins.
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Unexpired snapshot stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<WeatherSnapshot>, WeatherError>;

    /// Store a snapshot under `key` for `ttl`.
    async fn put(
        &self,
        key: &str,
        snapshot: WeatherSnapshot,
        ttl: Duration,
    ) -> Result<(), WeatherError>;

    /// Whether an unexpired entry currently exists for `key`.
    async fn exists(&self, key: &str) -> Result<bool, WeatherError> {
        Ok(self.get(key).await?.is_some())
    }
}

struct StoreEntry {
    snapshot: WeatherSnapshot,
    expires_at: Instant,
}

/// In-process [`WeatherStore`] with per-entry expiry.
///
/// Expired entries are evicted lazily on read.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoreEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<WeatherSnapshot>, WeatherError> {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.snapshot.clone()));
            }
            entries.remove(key);
        }
        Ok(None)
    }

    async fn put(
        &self,
        key: &str,
        snapshot: WeatherSnapshot,
        ttl: Duration,
    ) -> Result<(), WeatherError> {
        let entry = StoreEntry {
            snapshot,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().insert(key.to_string(), entry);
        Ok(())
    }
}
