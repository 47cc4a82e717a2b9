// # seed-core
//
// Core library for the cache seeding layer of the DDNS system.
//
// ## Architecture Overview
//
// A DDNS client that updates its remote records too eagerly risks being
// rate-limited or locked out by the provider. This library keeps the
// per-alias state that makes updates conservative:
// - **CacheStore**: Trait for the durable per-alias cache records
// - **HostResolver**: Trait for hostname resolution, the seeding fallback
// - **Seeder**: Orchestrates the startup seeding pass and the post-update
//   commit path
// - **ProviderRegistry**: Provider kinds registered with their seeding
//   capabilities
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Update protocols, IP detection, and
//    scheduling live outside this crate; only the baseline state is here
// 2. **Best-Effort Seeding**: A single alias failing to seed never aborts
//    the pass
// 3. **Library-First**: All functionality is usable without the daemon

pub mod alias;
pub mod cache;
pub mod config;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod seeder;
pub mod traits;

// Re-export core types for convenience
pub use alias::{Alias, ProviderAliases};
pub use cache::{FileCacheStore, LegacyCacheFile, MemoryCacheStore};
pub use config::{AliasConfig, ProviderConfig, SeedConfig};
pub use error::{Error, Result};
pub use registry::{ProviderCapabilities, ProviderRegistry};
pub use resolver::HickoryResolver;
pub use seeder::Seeder;
pub use traits::{CacheRecord, CacheStore, HostResolver};
