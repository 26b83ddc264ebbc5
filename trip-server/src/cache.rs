//! Caching layer for the remote seed table.
//!
//! Every page growth asks the seed source for the base table. The remote
//! table changes rarely, so it is cached with a TTL instead of being
//! refetched per page.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::seed::{RemoteSeed, SeedSource, SeedTable, SourceError};

/// Cached table entry.
type TableEntry = Arc<SeedTable>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 16,
        }
    }
}

/// Remote seed source with caching.
///
/// Wraps a `RemoteSeed` and caches its table, keyed by base URL.
pub struct CachedSeed {
    remote: RemoteSeed,
    tables: MokaCache<String, TableEntry>,
}

impl CachedSeed {
    /// Create a new cached source.
    pub fn new(remote: RemoteSeed, config: &CacheConfig) -> Self {
        let tables = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { remote, tables }
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.tables.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.tables.invalidate_all();
    }
}

impl SeedSource for CachedSeed {
    async fn base_records(&self) -> Result<TableEntry, SourceError> {
        let key = self.remote.base_url().to_string();

        if let Some(cached) = self.tables.get(&key).await {
            return Ok(cached);
        }

        debug!(url = %key, "seed table cache miss");
        let entry = Arc::new(self.remote.fetch_table().await?);
        self.tables.insert(key, Arc::clone(&entry)).await;

        Ok(entry)
    }
}
