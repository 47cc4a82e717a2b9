// # File Cache Store
//
// File-based implementation of CacheStore: one small record file per alias.
//
// ## Purpose
//
// Earlier DDNS clients recorded every hostname's last address in a single
// shared cache file, which made tracking update times per record
// impossible. This store keeps one file per alias, so each record carries
// its own address and update instant, and a stale record for one alias
// never disturbs another.
//
// ## Record Format
//
// ```text
// <state_dir>/<alias>.cache:
//   203.0.113.7
//   2025-01-09T12:00:00.103420973+00:00
// ```
//
// The first line is the address, the second the update instant in RFC 3339.
// Records written by older clients carry only the address line; for those
// the file's modification time stands in for the missing timestamp.
//
// ## Failure Model
//
// Reads degrade, writes report: a record that cannot be read (or parsed)
// seeds the alias as if it had never been seen, while a record that cannot
// be written surfaces an error the caller is free to ignore. The in-memory
// state stays authoritative either way.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::cache::legacy::LegacyCacheFile;
use crate::traits::cache_store::{CacheRecord, CacheStore};
use crate::{Error, Result};

/// Suffix of per-alias record files
const RECORD_SUFFIX: &str = "cache";

/// File-backed cache store with one record file per alias
///
/// The store never creates its state directory; whoever owns the runtime
/// layout (the daemon, a test) does that. A missing directory only shows up
/// as a save failure, which is non-fatal by contract.
///
/// # Example
///
/// ```rust,no_run
/// use seed_core::FileCacheStore;
/// use seed_core::traits::CacheStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileCacheStore::new("/var/lib/ddns-seed")
///         .with_legacy_file("/var/lib/ddns-seed/ddns.cache");
///
///     store.save("home.example.net", "203.0.113.7".parse()?).await?;
///     let record = store.load("home.example.net").await?;
///     assert!(record.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileCacheStore {
    state_dir: PathBuf,
    legacy: Option<LegacyCacheFile>,
}

impl FileCacheStore {
    /// Create a store over a runtime-state directory
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            legacy: None,
        }
    }

    /// Attach the deprecated shared cache file
    ///
    /// When set, a `load` that finds no per-alias record consults the
    /// legacy file once; see [`LegacyCacheFile`].
    pub fn with_legacy_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.legacy = Some(LegacyCacheFile::new(path));
        self
    }

    /// Path of the record file for an alias
    pub fn record_path(&self, alias_name: &str) -> PathBuf {
        self.state_dir
            .join(format!("{alias_name}.{RECORD_SUFFIX}"))
    }

    /// Modification time of a record file
    ///
    /// Used when the record carries no timestamp line. A stat failure
    /// degrades to "unknown instant" rather than an error.
    async fn modified_at(&self, path: &Path) -> Option<DateTime<Utc>> {
        match fs::metadata(path).await.and_then(|m| m.modified()) {
            Ok(mtime) => Some(DateTime::<Utc>::from(mtime)),
            Err(e) => {
                debug!("Could not stat cache record {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn load(&self, alias_name: &str) -> Result<Option<CacheRecord>> {
        let path = self.record_path(alias_name);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Expected state for a never-before-seen alias. The legacy
                // shared file, if configured, gets one chance to seed it.
                if let Some(legacy) = &self.legacy {
                    if let Some(record) = legacy.consume().await {
                        info!(
                            "Seeding {} from legacy cache file: {}",
                            alias_name, record.address
                        );
                        return Ok(Some(record));
                    }
                }
                return Ok(None);
            }
            Err(e) => {
                info!(
                    "Could not read cache record {}, treating alias as unseen: {}",
                    path.display(),
                    e
                );
                return Ok(None);
            }
        };

        let mut lines = content.lines();

        let address: IpAddr = match lines.next().map(str::trim) {
            Some(line) if !line.is_empty() => match line.parse() {
                Ok(address) => address,
                Err(_) => {
                    warn!(
                        "Cache record {} does not hold a valid address ({:?}), ignoring it",
                        path.display(),
                        line
                    );
                    return Ok(None);
                }
            },
            _ => {
                warn!("Cache record {} is empty, ignoring it", path.display());
                return Ok(None);
            }
        };

        let last_update = match lines.next().map(str::trim) {
            Some(line) if !line.is_empty() => match DateTime::parse_from_rfc3339(line) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                // Unreadable timestamp line: fall back like an old one-line record.
                Err(_) => self.modified_at(&path).await,
            },
            _ => self.modified_at(&path).await,
        };

        Ok(Some(CacheRecord {
            address,
            last_update,
        }))
    }

    async fn save(&self, alias_name: &str, address: IpAddr) -> Result<()> {
        let path = self.record_path(alias_name);
        let record = CacheRecord::new(address);

        let mut content = record.address.to_string();
        content.push('\n');
        if let Some(ts) = record.last_update {
            content.push_str(&ts.to_rfc3339());
            content.push('\n');
        }

        // Write-then-rename so a crash mid-write never leaves a truncated
        // record behind.
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content.as_bytes()).await.map_err(|e| {
            Error::cache_store(format!(
                "Failed to write cache record {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &path).await.map_err(|e| {
            Error::cache_store(format!(
                "Failed to move cache record into place at {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Cache record for {} written: {}", alias_name, address);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        let address: IpAddr = "203.0.113.7".parse().unwrap();
        let before = Utc::now();
        store.save("home.example.net", address).await.unwrap();
        let after = Utc::now();

        let record = store.load("home.example.net").await.unwrap().unwrap();
        assert_eq!(record.address, address);

        let ts = record.last_update.expect("save must stamp the record");
        assert!(ts >= before && ts <= after, "timestamp {ts} outside [{before}, {after}]");
    }

    #[tokio::test]
    async fn test_missing_record_is_not_an_error_and_has_no_side_effects() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        let record = store.load("never.seen.example.net").await.unwrap();
        assert!(record.is_none());

        // Deterministic and side-effect free: nothing was created.
        let record = store.load("never.seen.example.net").await.unwrap();
        assert!(record.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_records_are_independent() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        let first: IpAddr = "192.0.2.1".parse().unwrap();
        store.save("one.example.net", first).await.unwrap();
        store.save("two.example.net", "192.0.2.2".parse().unwrap()).await.unwrap();
        store.save("two.example.net", "192.0.2.3".parse().unwrap()).await.unwrap();

        let record = store.load("one.example.net").await.unwrap().unwrap();
        assert_eq!(record.address, first, "rewriting two.* must not touch one.*");
    }

    #[tokio::test]
    async fn test_trailing_whitespace_is_trimmed() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        std::fs::write(store.record_path("host.example.net"), "198.51.100.9  \n").unwrap();

        let record = store.load("host.example.net").await.unwrap().unwrap();
        assert_eq!(record.address, "198.51.100.9".parse::<IpAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_one_line_record_falls_back_to_mtime() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        // Record as written by the old format: address only.
        std::fs::write(store.record_path("host.example.net"), "198.51.100.9\n").unwrap();

        let record = store.load("host.example.net").await.unwrap().unwrap();
        let ts = record.last_update.expect("mtime should stand in for the timestamp");
        assert!(Utc::now().signed_duration_since(ts) < chrono::Duration::seconds(60));
    }

    #[tokio::test]
    async fn test_malformed_address_is_treated_as_unseen() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        std::fs::write(store.record_path("host.example.net"), "not-an-address\n").unwrap();
        assert!(store.load("host.example.net").await.unwrap().is_none());

        std::fs::write(store.record_path("host.example.net"), "").unwrap();
        assert!(store.load("host.example.net").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails_with_store_error() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path().join("does-not-exist"));

        let err = store
            .save("host.example.net", "192.0.2.1".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CacheStore(_)));
    }

    #[tokio::test]
    async fn test_ipv6_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());

        let address: IpAddr = "2001:db8::7".parse().unwrap();
        store.save("v6.example.net", address).await.unwrap();

        let record = store.load("v6.example.net").await.unwrap().unwrap();
        assert_eq!(record.address, address);
    }
}
