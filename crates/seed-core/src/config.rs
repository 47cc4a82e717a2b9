//! Configuration types for the cache seeding layer
//!
//! This module defines the configuration structures and the plan-building
//! step that turns them into seedable in-memory state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::alias::{Alias, ProviderAliases};
use crate::registry::ProviderRegistry;

/// Main seeding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Runtime-state directory holding one cache record per alias
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Path of the deprecated shared cache file, consumed once and removed
    #[serde(default)]
    pub legacy_cache_file: Option<PathBuf>,

    /// Configured DDNS providers and their aliases
    pub providers: Vec<ProviderConfig>,
}

impl SeedConfig {
    /// Validate the configuration
    ///
    /// Violations are the fatal error class: they abort startup before any
    /// cache file is touched.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.providers.is_empty() {
            return Err(crate::Error::config("No providers configured"));
        }

        for provider in &self.providers {
            provider.validate()?;
        }

        Ok(())
    }

    /// Build the seeding plan: one alias group per provider, with the
    /// lookup policy resolved against the registry
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ProviderAliases>)`: Disabled aliases are excluded
    /// - `Err(Error::Config)`: Invalid configuration or unknown provider
    ///   kind without an explicit `hostname_lookup` override
    pub fn plan(&self, registry: &ProviderRegistry) -> Result<Vec<ProviderAliases>, crate::Error> {
        self.validate()?;

        let mut plan = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let hostname_lookup = match provider.hostname_lookup {
                Some(explicit) => explicit,
                None => {
                    registry
                        .capabilities(&provider.kind)
                        .ok_or_else(|| {
                            crate::Error::config(format!(
                                "Unknown provider kind: {}",
                                provider.kind
                            ))
                        })?
                        .hostname_lookup
                }
            };

            let aliases = provider
                .aliases
                .iter()
                .filter(|alias| alias.enabled)
                .map(|alias| Alias::new(&alias.name))
                .collect();

            plan.push(ProviderAliases::new(&provider.kind, hostname_lookup, aliases));
        }

        Ok(plan)
    }
}

/// One DDNS provider and the aliases it manages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider kind, matched against the provider registry
    pub kind: String,

    /// Override of the registry's hostname-lookup capability
    ///
    /// Lets a configuration use a kind the registry does not know.
    #[serde(default)]
    pub hostname_lookup: Option<bool>,

    /// Aliases managed under this provider
    #[serde(default)]
    pub aliases: Vec<AliasConfig>,
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.kind.is_empty() {
            return Err(crate::Error::config("Provider kind cannot be empty"));
        }

        for alias in &self.aliases {
            validate_alias_name(&alias.name)?;
        }

        Ok(())
    }
}

/// One managed hostname
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasConfig {
    /// The DNS hostname to keep in sync
    pub name: String,

    /// Whether this alias is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl AliasConfig {
    /// Create an enabled alias configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }

    /// Enable or disable the alias
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Validate that a string is a usable alias name
///
/// This implements basic DNS domain name validation per RFC 1035. The same
/// rules guarantee the name is safe to embed in a cache file path (no path
/// separators and bounded length).
fn validate_alias_name(name: &str) -> Result<(), crate::Error> {
    if name.is_empty() {
        return Err(crate::Error::config("Alias name cannot be empty"));
    }

    // RFC 1035: 253 chars max
    if name.len() > 253 {
        return Err(crate::Error::config(format!(
            "Alias name too long: {} chars (max 253)",
            name.len()
        )));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Alias name has an empty label: '{name}'"
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Alias label too long: {} chars (max 63) in '{name}'",
                label.len()
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(crate::Error::config(format!(
                "Alias label contains invalid characters: '{label}'"
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Alias label cannot start or end with a hyphen: '{label}'"
            )));
        }
    }

    Ok(())
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("/var/lib/ddns-seed")
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn config_with(aliases: Vec<AliasConfig>) -> SeedConfig {
        SeedConfig {
            state_dir: default_state_dir(),
            legacy_cache_file: None,
            providers: vec![ProviderConfig {
                kind: "dyndns2".to_string(),
                hostname_lookup: None,
                aliases,
            }],
        }
    }

    #[test]
    fn test_empty_provider_list_is_rejected() {
        let config = SeedConfig {
            state_dir: default_state_dir(),
            legacy_cache_file: None,
            providers: Vec::new(),
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_alias_name_validation() {
        assert!(config_with(vec![AliasConfig::new("home.example.net")]).validate().is_ok());

        for bad in ["", "double..dot", "has space.example.net", "-lead.example.net", "trail-.example.net", "under_score.example.net"] {
            assert!(
                config_with(vec![AliasConfig::new(bad)]).validate().is_err(),
                "{bad:?} should be rejected"
            );
        }

        let long_label = format!("{}.example.net", "a".repeat(64));
        assert!(config_with(vec![AliasConfig::new(long_label)]).validate().is_err());

        let long_name = format!("{}.example.net", "a.".repeat(130));
        assert!(config_with(vec![AliasConfig::new(long_name)]).validate().is_err());
    }

    #[test]
    fn test_plan_resolves_capabilities_from_registry() {
        let registry = ProviderRegistry::with_builtins();
        let config = SeedConfig {
            state_dir: default_state_dir(),
            legacy_cache_file: None,
            providers: vec![
                ProviderConfig {
                    kind: "dyndns2".to_string(),
                    hostname_lookup: None,
                    aliases: vec![AliasConfig::new("home.example.net")],
                },
                ProviderConfig {
                    kind: "tunnelbroker".to_string(),
                    hostname_lookup: None,
                    aliases: vec![AliasConfig::new("tunnel.example.net")],
                },
            ],
        };

        let plan = config.plan(&registry).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan[0].hostname_lookup);
        assert!(!plan[1].hostname_lookup);
        assert_eq!(plan[0].aliases[0].name(), "home.example.net");
    }

    #[test]
    fn test_plan_rejects_unknown_kind_without_override() {
        let registry = ProviderRegistry::with_builtins();

        let mut config = config_with(vec![AliasConfig::new("home.example.net")]);
        config.providers[0].kind = "garage-dns".to_string();
        assert!(matches!(config.plan(&registry), Err(Error::Config(_))));

        // An explicit override makes the unknown kind usable.
        config.providers[0].hostname_lookup = Some(false);
        let plan = config.plan(&registry).unwrap();
        assert!(!plan[0].hostname_lookup);
    }

    #[test]
    fn test_plan_skips_disabled_aliases() {
        let registry = ProviderRegistry::with_builtins();
        let config = config_with(vec![
            AliasConfig::new("home.example.net"),
            AliasConfig::new("off.example.net").with_enabled(false),
        ]);

        let plan = config.plan(&registry).unwrap();
        assert_eq!(plan[0].aliases.len(), 1);
        assert_eq!(plan[0].aliases[0].name(), "home.example.net");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: SeedConfig = serde_json::from_str(
            r#"{
                "providers": [
                    { "kind": "dyndns2", "aliases": [ { "name": "home.example.net" } ] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.state_dir, default_state_dir());
        assert_eq!(config.legacy_cache_file, None);
        assert!(config.providers[0].aliases[0].enabled);
        assert!(config.validate().is_ok());
    }
}
