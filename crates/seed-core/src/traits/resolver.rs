// # Host Resolver Trait
//
// Defines the interface for hostname resolution.
//
// Resolution is only a fallback: it runs when an alias has no cache record,
// to recover a baseline address from whatever the public DNS currently
// says. A resolution failure means "no baseline", never a fatal error.

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for resolver implementations
///
/// Implementations perform a single blocking-equivalent query with the
/// resolver's own defaults. Retry and deadline policy belong to the
/// scheduler driving the seeding pass, not here.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve a hostname to a single numeric address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The preferred address for the hostname
    /// - `Err(Error)`: Resolution failed (NXDOMAIN, network unreachable,
    ///   ...); callers leave the alias unseeded
    async fn resolve(&self, hostname: &str) -> Result<IpAddr, crate::Error>;

    /// Drop any resolver-side cached answers
    ///
    /// Invoked once at the start of a seeding pass, before the first
    /// lookup. The default is a no-op for resolvers that hold no cache.
    fn reset_cache(&self) {}
}
