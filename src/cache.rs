// src/cache.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

pub const ENV_CACHE_DIR: &str = "STATUS_CACHE_DIR";

/// One cached feed: body plus revalidation metadata.
///
/// Stored as a single JSON record per key, written via temp file + rename,
/// so content and metadata can never tear apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub content: String,
    pub etag: Option<String>,
    /// Unix seconds (UTC) at the time of the store.
    pub fetched_at: i64,
}

/// Simple file-based cache for feed content, one record per key.
///
/// Single-process use only; there is no locking, and concurrent writers to
/// the same key are last-write-wins.
#[derive(Debug)]
pub struct FeedCache {
    dir: PathBuf,
}

impl FeedCache {
    /// Open a cache rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Default cache location: `$STATUS_CACHE_DIR`, else `~/.cache/status-page`.
    pub fn default_dir() -> PathBuf {
        if let Ok(p) = std::env::var(ENV_CACHE_DIR) {
            return PathBuf::from(p);
        }
        match std::env::var("HOME") {
            Ok(home) => Path::new(&home).join(".cache").join("status-page"),
            Err(_) => PathBuf::from(".cache/status-page"),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        // Keys may be full URLs; keep the file name flat and filesystem-safe.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    /// Cached content and metadata for `key`, or `None` if absent.
    /// Unreadable records behave as absent.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let raw = fs::read_to_string(self.entry_path(key)).ok()?;
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(key, error = %e, "ignoring unreadable cache record");
                None
            }
        }
    }

    /// Like [`get`](Self::get), but `None` when the entry is stale.
    /// An entry aged exactly `max_age_secs` counts as stale.
    pub fn get_if_fresh(&self, key: &str, max_age_secs: i64) -> Option<CacheEntry> {
        let entry = self.get(key)?;
        if Utc::now().timestamp() - entry.fetched_at >= max_age_secs {
            return None;
        }
        Some(entry)
    }

    /// Persist content and metadata for `key`, stamping the current time.
    /// Fully replaces any prior record.
    pub fn store(&self, key: &str, content: &str, etag: Option<&str>) -> Result<()> {
        let entry = CacheEntry {
            content: content.to_string(),
            etag: etag.map(str::to_string),
            fetched_at: Utc::now().timestamp(),
        };
        let path = self.entry_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string(&entry)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Whether a cached record for `key` exists and is still fresh.
    pub fn is_fresh(&self, key: &str, max_age_secs: i64) -> bool {
        self.get_if_fresh(key, max_age_secs).is_some()
    }
}
