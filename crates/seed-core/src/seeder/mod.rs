//! Startup cache seeding
//!
//! At boot, or when the client is restarted at runtime, the in-memory alias
//! table is empty. Updating every remote record anyway risks being locked
//! out for abuse, so each alias is seeded first: from its cache record when
//! one exists, otherwise from a live DNS query when the provider supports
//! one.
//!
//! ## Flow
//!
//! ```text
//! seed_all ─── reset resolver cache
//!     │
//!     └─ per provider (hostname_lookup policy from the plan)
//!           │
//!           └─ per alias ── CacheStore::load ──┬─ record   → address + last_update
//!                                              ├─ absent, lookup applies
//!                                              │      → HostResolver::resolve
//!                                              │        (address only, instant unknown)
//!                                              └─ absent, no lookup → left empty
//! ```
//!
//! Per-alias failures never abort the pass. After a confirmed remote
//! update, the provider client calls [`Seeder::commit`], the only path
//! that moves `address` and `last_update` together.

use chrono::Utc;
use std::net::IpAddr;
use tracing::{debug, info, warn};

use crate::alias::{Alias, ProviderAliases};
use crate::traits::cache_store::CacheStore;
use crate::traits::resolver::HostResolver;
use crate::{Error, Result};

/// Orchestrates the seeding pass and the post-update commit path
pub struct Seeder {
    cache: Box<dyn CacheStore>,
    resolver: Box<dyn HostResolver>,
}

impl Seeder {
    /// Create a seeder over a cache store and a resolver
    pub fn new(cache: Box<dyn CacheStore>, resolver: Box<dyn HostResolver>) -> Self {
        Self { cache, resolver }
    }

    /// Seed every alias of every provider, best-effort
    ///
    /// Invoked once at startup, and again on an explicit reload event.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The pass ran to completion; individual aliases may
    ///   still be unseeded
    /// - `Err(Error::Config)`: Nothing to seed; a structural precondition
    ///   violation is the only fatal case
    pub async fn seed_all(&self, providers: &mut [ProviderAliases]) -> Result<()> {
        if providers.is_empty() {
            return Err(Error::config("No providers to seed"));
        }

        // Local name-service caches returning outdated answers is a known
        // problem for DDNS clients; drop resolver state before the pass.
        self.resolver.reset_cache();

        for provider in providers.iter_mut() {
            debug!(
                "Seeding provider {} (hostname lookup: {})",
                provider.kind, provider.hostname_lookup
            );
            for alias in provider.aliases.iter_mut() {
                self.seed_one(alias, provider.hostname_lookup).await;
            }
        }

        Ok(())
    }

    /// Seed a single alias; never fails
    async fn seed_one(&self, alias: &mut Alias, hostname_lookup: bool) {
        // A reload must not carry values over from the previous pass.
        alias.clear();

        let record = match self.cache.load(alias.name()).await {
            Ok(record) => record,
            Err(e) => {
                info!(
                    "Cache lookup for {} failed, treating it as unseen: {}",
                    alias.name(),
                    e
                );
                None
            }
        };

        if let Some(record) = record {
            alias.set_cached(record.address, record.last_update);
            match record.last_update {
                Some(ts) => info!(
                    "Cached address {} for {}, last update {}",
                    record.address,
                    alias.name(),
                    ts.to_rfc3339()
                ),
                None => info!(
                    "Cached address {} for {}, last update unknown",
                    record.address,
                    alias.name()
                ),
            }
            return;
        }

        if !hostname_lookup {
            debug!(
                "No cache record for {} and its provider has no hostname to look up",
                alias.name()
            );
            return;
        }

        // A live answer is still a usable baseline address, though nothing
        // is known about when it was last published.
        match self.resolver.resolve(alias.name()).await {
            Ok(address) => alias.set_resolved(address),
            // Resolution failures are logged by the resolver; the alias
            // stays unseeded and the next scheduled cycle tries again.
            Err(_) => {}
        }
    }

    /// Record a confirmed remote update for an alias
    ///
    /// Called by the provider client once the remote DDNS record is known
    /// to hold `address`. In-memory state is updated first and stays
    /// authoritative; a persist failure costs at most a redundant remote
    /// update after the next restart.
    pub async fn commit(&self, alias: &mut Alias, address: IpAddr) -> Result<()> {
        alias.set_updated(address, Utc::now());

        if let Err(e) = self.cache.save(alias.name(), address).await {
            warn!(
                "Could not persist cache record for {}: {}",
                alias.name(),
                e
            );
            return Err(e);
        }

        debug!("Committed {} for {}", address, alias.name());
        Ok(())
    }
}
