// # Memory Cache Store
//
// In-memory implementation of CacheStore.
//
// ## Purpose
//
// Provides a simple, fast cache store that doesn't persist across
// restarts. The first seeding pass after a restart falls back to live
// resolution for every alias, which costs at most one redundant remote
// update per record.
//
// ## When to Use
//
// - Testing environments
// - Embedding the seeder where no writable state directory exists
// - Container deployments where a restart is acceptable

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Result;
use crate::traits::cache_store::{CacheRecord, CacheStore};

/// In-memory cache store implementation
///
/// All records live in a HashMap behind a RwLock. Clones share the same
/// underlying map, which is what tests use to inspect state after handing
/// a boxed clone to the seeder.
#[derive(Debug, Clone)]
pub struct MemoryCacheStore {
    inner: Arc<RwLock<HashMap<String, CacheRecord>>>,
}

impl MemoryCacheStore {
    /// Create a new empty memory cache store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of records in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Clear all records from the store
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn load(&self, alias_name: &str) -> Result<Option<CacheRecord>> {
        Ok(self.inner.read().await.get(alias_name).copied())
    }

    async fn save(&self, alias_name: &str, address: IpAddr) -> Result<()> {
        let record = CacheRecord::new(address);
        self.inner
            .write()
            .await
            .insert(alias_name.to_string(), record);
        Ok(())
    }
}
