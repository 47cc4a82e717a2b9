//! Provider capability registry
//!
//! Seeding policy differs by DDNS provider: most manage hostnames that can
//! be looked up in public DNS, but some, such as IPv6 tunnel brokers,
//! update a tunnel endpoint that has no hostname to resolve at all. Rather than
//! string-matching provider names at the seeding call site, every provider
//! kind is registered here with an explicit capability set, and the
//! seeding plan consults the registry.
//!
//! ## Usage
//!
//! ```rust
//! use seed_core::registry::{ProviderCapabilities, ProviderRegistry};
//!
//! let registry = ProviderRegistry::with_builtins();
//! assert!(registry.capabilities("dyndns2").unwrap().hostname_lookup);
//!
//! // Site-specific kinds register alongside the builtins
//! registry.register("internal-dns", ProviderCapabilities { hostname_lookup: false });
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

/// Seeding-relevant capabilities of a provider kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderCapabilities {
    /// Whether the provider's aliases are public hostnames worth resolving
    /// when no cache record exists
    pub hostname_lookup: bool,
}

/// Registry of provider kinds and their capabilities
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ProviderRegistry {
    kinds: RwLock<HashMap<String, ProviderCapabilities>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in provider kinds
    pub fn with_builtins() -> Self {
        let registry = Self::new();

        for kind in ["dyndns2", "duckdns", "cloudflare", "freedns"] {
            registry.register(kind, ProviderCapabilities { hostname_lookup: true });
        }

        // Tunnel brokers update a tunnel endpoint, not a resolvable hostname.
        registry.register("tunnelbroker", ProviderCapabilities { hostname_lookup: false });

        registry
    }

    /// Register a provider kind
    ///
    /// Registering an existing kind replaces its capabilities.
    ///
    /// # Parameters
    ///
    /// - `kind`: Provider kind name (e.g., "dyndns2", "tunnelbroker")
    /// - `capabilities`: Seeding capabilities declared for the kind
    pub fn register(&self, kind: impl Into<String>, capabilities: ProviderCapabilities) {
        let mut kinds = self.kinds.write().unwrap();
        kinds.insert(kind.into(), capabilities);
    }

    /// Look up the capabilities of a provider kind
    ///
    /// # Returns
    ///
    /// `None` if the kind was never registered
    pub fn capabilities(&self, kind: &str) -> Option<ProviderCapabilities> {
        let kinds = self.kinds.read().unwrap();
        kinds.get(kind).copied()
    }

    /// Check if a provider kind is registered
    pub fn has_kind(&self, kind: &str) -> bool {
        let kinds = self.kinds.read().unwrap();
        kinds.contains_key(kind)
    }

    /// List all registered provider kinds
    pub fn kinds(&self) -> Vec<String> {
        let kinds = self.kinds.read().unwrap();
        kinds.keys().cloned().collect()
    }
}
