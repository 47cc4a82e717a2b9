// # Hickory Resolver
//
// Production HostResolver built on hickory-resolver's tokio resolver.
//
// Reads the system resolver configuration (/etc/resolv.conf) and prefers
// IPv4 answers, since DDNS A records are what the update protocols compare
// against. No retries and no timeouts beyond the resolver's own defaults;
// that policy belongs to the scheduler driving the seeding pass.

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::LookupIpStrategy;
use std::net::IpAddr;
use tracing::{debug, info, warn};

use crate::traits::resolver::HostResolver;
use crate::{Error, Result};

/// System-resolver adapter used when an alias has no cache record
pub struct HickoryResolver {
    inner: TokioResolver,
}

impl HickoryResolver {
    /// Create a resolver from the system configuration
    ///
    /// # Returns
    ///
    /// - `Ok(HickoryResolver)`: Ready to resolve
    /// - `Err(Error)`: The system resolver configuration could not be read
    pub fn from_system_conf() -> Result<Self> {
        let mut builder = TokioResolver::builder_tokio().map_err(|e| {
            Error::resolve(format!(
                "Failed to read system resolver configuration: {e}"
            ))
        })?;
        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4thenIpv6;

        Ok(Self {
            inner: builder.build(),
        })
    }
}

#[async_trait]
impl HostResolver for HickoryResolver {
    async fn resolve(&self, hostname: &str) -> Result<IpAddr> {
        let lookup = match self.inner.lookup_ip(hostname).await {
            Ok(lookup) => lookup,
            Err(e) => {
                warn!("Failed resolving hostname {}: {}", hostname, e);
                return Err(Error::resolve(e.to_string()));
            }
        };

        match lookup.iter().next() {
            Some(address) => {
                info!("Resolved hostname {} => {}", hostname, address);
                Ok(address)
            }
            None => {
                warn!("Failed resolving hostname {}: empty answer", hostname);
                Err(Error::resolve(format!("No address records for {hostname}")))
            }
        }
    }

    fn reset_cache(&self) {
        // Local name-service caches returning outdated answers is a known
        // problem for DDNS clients; start every seeding pass clean.
        debug!("Clearing resolver cache");
        self.inner.clear_cache();
    }
}
