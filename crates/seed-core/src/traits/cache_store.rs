// # Cache Store Trait
//
// Defines the interface for the durable per-alias cache records.
//
// ## Purpose
//
// The cache store remembers, for each alias, the last address successfully
// published to its DDNS provider and the instant of that publication. The
// seeding pass reads it at startup so a freshly restarted client does not
// repeat updates the provider has already seen; providers rate-limit or
// ban clients that update too often.
//
// ## Implementations
//
// - File-based: one small record file per alias
// - Memory: non-persistent, for tests and embedding

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::net::IpAddr;

/// Durable record for one alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CacheRecord {
    /// The last address successfully published for the alias
    pub address: IpAddr,
    /// When that address was published
    ///
    /// `None` when the instant could not be recovered from the record
    /// (a degraded read, not an error).
    pub last_update: Option<DateTime<Utc>>,
}

impl CacheRecord {
    /// Create a record stamped with the current instant
    ///
    /// # Visibility
    ///
    /// `pub(crate)` so records always originate from a store's save path or
    /// a recovered read, never from external construction.
    pub(crate) fn new(address: IpAddr) -> Self {
        Self {
            address,
            last_update: Some(Utc::now()),
        }
    }
}

/// Trait for cache store implementations
///
/// One record per alias; records for different aliases are fully
/// independent. Implementations are not required to guard against
/// concurrent external writers; a single process owns a cache directory.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Load the cache record for an alias
    ///
    /// # Parameters
    ///
    /// - `alias_name`: The managed hostname
    ///
    /// # Returns
    ///
    /// - `Ok(Some(CacheRecord))`: A record exists
    /// - `Ok(None)`: Never-before-seen alias; the expected state for a
    ///   fresh configuration, not an error
    /// - `Err(Error)`: Storage error the implementation could not recover
    async fn load(&self, alias_name: &str) -> Result<Option<CacheRecord>, crate::Error>;

    /// Persist a new address for an alias
    ///
    /// Called after a remote update has been confirmed. The record's
    /// update instant is taken by the store at the moment of the save.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Successfully persisted
    /// - `Err(Error)`: The record could not be written; callers treat this
    ///   as lost durability for the cycle, not as a failed update
    async fn save(&self, alias_name: &str, address: IpAddr) -> Result<(), crate::Error>;
}
