// # Alias State
//
// In-memory state for the hostnames ("aliases") managed by the client.
//
// ## Purpose
//
// Each alias remembers the last address known to be published at the remote
// DDNS provider and when. The scheduler reads this to decide whether an
// update is due at all; the provider clients read it as the baseline to
// compare a freshly detected IP against.
//
// ## Lifecycle
//
// Aliases are created empty from configuration, populated once per process
// by [`Seeder::seed_all`](crate::Seeder::seed_all), and mutated afterwards
// only through [`Seeder::commit`](crate::Seeder::commit) when a remote
// update has been confirmed.

use chrono::{DateTime, Duration, Utc};
use std::net::IpAddr;

/// Seeded state for a single managed hostname
///
/// `address` and `last_update` move together through the commit path. The
/// one exception is an alias seeded from a live DNS answer: the address is
/// a usable baseline, but nothing is known about when it was published, so
/// `last_update` stays `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    name: String,
    address: Option<IpAddr>,
    last_update: Option<DateTime<Utc>>,
}

impl Alias {
    /// Create an empty alias for a hostname
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            last_update: None,
        }
    }

    /// The managed hostname; also derives the alias's cache file path
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last address known to be published, `None` when unknown
    pub fn address(&self) -> Option<IpAddr> {
        self.address
    }

    /// When the current address was known valid, `None` when unknown
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Whether the alias holds a usable baseline address
    pub fn is_seeded(&self) -> bool {
        self.address.is_some()
    }

    /// Reset to the unseeded state
    ///
    /// A re-seed must not carry values over from a previous pass.
    pub fn clear(&mut self) {
        self.address = None;
        self.last_update = None;
    }

    /// Time elapsed since the last confirmed update, `None` when unknown
    pub fn time_since_update(&self) -> Option<Duration> {
        self.last_update
            .map(|ts| Utc::now().signed_duration_since(ts))
    }

    /// Check if the alias is stale (older than the given duration)
    ///
    /// An alias with no known update instant is always stale.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        match self.last_update {
            Some(ts) => Utc::now().signed_duration_since(ts) > max_age,
            None => true,
        }
    }

    /// Populate from a recovered cache record
    pub(crate) fn set_cached(&mut self, address: IpAddr, last_update: Option<DateTime<Utc>>) {
        self.address = Some(address);
        self.last_update = last_update;
    }

    /// Populate from a live DNS answer; the update instant stays unknown
    pub(crate) fn set_resolved(&mut self, address: IpAddr) {
        self.address = Some(address);
        self.last_update = None;
    }

    /// Record a confirmed remote update
    pub(crate) fn set_updated(&mut self, address: IpAddr, now: DateTime<Utc>) {
        self.address = Some(address);
        self.last_update = Some(now);
    }
}

/// The aliases of one configured provider, with its seeding policy resolved
///
/// `hostname_lookup` is fixed when the seeding plan is built from the
/// provider registry, so the seeding pass never inspects provider names.
#[derive(Debug, Clone)]
pub struct ProviderAliases {
    /// Provider kind the aliases belong to (e.g. "dyndns2")
    pub kind: String,
    /// Whether a live DNS lookup is a meaningful fallback for these aliases
    pub hostname_lookup: bool,
    /// The aliases managed under this provider
    pub aliases: Vec<Alias>,
}

impl ProviderAliases {
    /// Group aliases under a provider kind with a resolved lookup policy
    pub fn new(kind: impl Into<String>, hostname_lookup: bool, aliases: Vec<Alias>) -> Self {
        Self {
            kind: kind.into(),
            hostname_lookup,
            aliases,
        }
    }
}
