// # Legacy Cache File
//
// One-shot migration from the deprecated shared cache format.
//
// ## Purpose
//
// Before per-alias records, the client kept a single cache file holding one
// address for all hostnames. When a per-alias record is missing, the first
// load falls back here: the file's address line and modification time seed
// that alias, and the file is removed so it is consumed at most once per
// process lifetime, whichever alias gets there first.
//
// Everything in this path is best-effort. A legacy file that is absent,
// unreadable, malformed, or undeletable must never block seeding.

use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::traits::cache_store::CacheRecord;

/// The deprecated shared cache file, consumed at most once per process
///
/// Removing the file is the durable "already migrated" marker across
/// processes; the atomic flag is the in-process one.
#[derive(Debug)]
pub struct LegacyCacheFile {
    path: PathBuf,
    consumed: AtomicBool,
}

impl LegacyCacheFile {
    /// Wrap the well-known legacy cache path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            consumed: AtomicBool::new(false),
        }
    }

    /// The wrapped path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the legacy record
    ///
    /// The first call reads the file's address line, captures the file's
    /// modification time as the record's update instant, and deletes the
    /// file. Every later call returns `None` without touching the
    /// filesystem.
    pub async fn consume(&self) -> Option<CacheRecord> {
        if self.consumed.swap(true, Ordering::SeqCst) {
            return None;
        }

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                debug!(
                    "Could not read legacy cache file {}: {}",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        // The old file's modification time is the best available guess for
        // when the address it holds was last published.
        let last_update = match fs::metadata(&self.path).await.and_then(|m| m.modified()) {
            Ok(mtime) => Some(DateTime::<Utc>::from(mtime)),
            Err(_) => None,
        };

        let record = content.lines().next().and_then(|line| {
            let line = line.trim();
            match line.parse::<IpAddr>() {
                Ok(address) => Some(CacheRecord {
                    address,
                    last_update,
                }),
                Err(_) => {
                    warn!(
                        "Legacy cache file {} does not hold a valid address ({:?})",
                        self.path.display(),
                        line
                    );
                    None
                }
            }
        });

        // Remove it either way; a malformed legacy file is not worth keeping.
        match fs::remove_file(&self.path).await {
            Ok(()) => info!("Consumed and removed legacy cache file {}", self.path.display()),
            Err(e) => warn!(
                "Could not remove legacy cache file {}: {}",
                self.path.display(),
                e
            ),
        }

        record
    }
}
