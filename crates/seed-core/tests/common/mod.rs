//! Test doubles and common utilities for seeding contract tests
//!
//! The doubles count their calls so tests can verify which paths a seeding
//! pass actually took.

use seed_core::error::Result;
use seed_core::traits::{CacheRecord, CacheStore, HostResolver};
use seed_core::{Alias, Error, ProviderAliases};
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A resolver that answers every lookup with a fixed address
pub struct CountingResolver {
    address: IpAddr,
    /// Call counter for resolve()
    resolve_call_count: Arc<AtomicUsize>,
    /// Call counter for reset_cache()
    reset_call_count: Arc<AtomicUsize>,
}

impl CountingResolver {
    pub fn new(address: IpAddr) -> Self {
        Self {
            address,
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
            reset_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times resolve() was called
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times reset_cache() was called
    pub fn reset_call_count(&self) -> usize {
        self.reset_call_count.load(Ordering::SeqCst)
    }

    /// Create a new CountingResolver that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            address: other.address,
            resolve_call_count: Arc::clone(&other.resolve_call_count),
            reset_call_count: Arc::clone(&other.reset_call_count),
        }
    }
}

#[async_trait::async_trait]
impl HostResolver for CountingResolver {
    async fn resolve(&self, _hostname: &str) -> Result<IpAddr> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.address)
    }

    fn reset_cache(&self) {
        self.reset_call_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// A resolver for which every lookup fails
pub struct FailingResolver {
    resolve_call_count: Arc<AtomicUsize>,
}

impl FailingResolver {
    pub fn new() -> Self {
        Self {
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            resolve_call_count: Arc::clone(&other.resolve_call_count),
        }
    }
}

#[async_trait::async_trait]
impl HostResolver for FailingResolver {
    async fn resolve(&self, hostname: &str) -> Result<IpAddr> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::resolve(format!("no such host: {hostname}")))
    }
}

/// A cache store for which every save fails and every load misses
pub struct BrokenCacheStore;

#[async_trait::async_trait]
impl CacheStore for BrokenCacheStore {
    async fn load(&self, _alias_name: &str) -> Result<Option<CacheRecord>> {
        Ok(None)
    }

    async fn save(&self, alias_name: &str, _address: IpAddr) -> Result<()> {
        Err(Error::cache_store(format!(
            "read-only filesystem, cannot persist {alias_name}"
        )))
    }
}

/// Helper to build a seedable provider group
pub fn provider(kind: &str, hostname_lookup: bool, names: &[&str]) -> ProviderAliases {
    ProviderAliases::new(
        kind,
        hostname_lookup,
        names.iter().map(|name| Alias::new(*name)).collect(),
    )
}
