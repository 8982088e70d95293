//! Persistent store for bookmarks, history, and site permissions.
//!
//! The store is a flat JSON document on disk, loaded synchronously at
//! startup and written through on every mutation. It deliberately stays
//! dumb: no caching layer, no background flushing, just a struct and a
//! file.
//!
//! # Document Format
//!
//! ```json
//! {
//!   "bookmarks": { "https://example.com/": "Example" },
//!   "history": [
//!     { "url": "https://example.com/", "title": "Example", "timestamp": 1735689600000 }
//!   ],
//!   "permissions": {
//!     "example.com": { "camera": "allow", "geolocation": "deny" }
//!   }
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::permissions::{PermissionKind, PermissionStatus};

// ============================================================================
// Constants
// ============================================================================

/// Maximum history entries kept on disk.
const HISTORY_CAP: usize = 1000;

/// Maximum history entries returned to the UI.
const RECENT_LIMIT: usize = 100;

// ============================================================================
// Types
// ============================================================================

/// A single visited-page record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Visited URL.
    pub url: String,
    /// Page title at visit time (may be empty).
    pub title: String,
    /// Visit time in epoch milliseconds.
    pub timestamp: u64,
}

/// The on-disk document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    /// url -> title.
    #[serde(default)]
    bookmarks: FxHashMap<String, String>,

    /// Newest-first visit list.
    #[serde(default)]
    history: Vec<HistoryEntry>,

    /// host -> kind -> status.
    #[serde(default)]
    permissions: FxHashMap<String, FxHashMap<PermissionKind, PermissionStatus>>,
}

// ============================================================================
// Store
// ============================================================================

/// File-backed store with write-through persistence.
///
/// All mutations save the full document; a save failure is reported to the
/// caller but leaves the in-memory state mutated, so a later mutation can
/// still flush everything.
#[derive(Debug)]
pub struct Store {
    /// Document location on disk.
    path: PathBuf,
    /// In-memory document.
    data: StoreData,
}

// ============================================================================
// Store - Lifecycle
// ============================================================================

impl Store {
    /// Opens the store at `path`, loading the existing document if present.
    ///
    /// A missing file starts an empty document. A corrupt file is logged
    /// and replaced with an empty document on the next save; a bad cache
    /// file must never prevent startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let data = Self::load(&path);
        debug!(
            path = %path.display(),
            bookmarks = data.bookmarks.len(),
            history = data.history.len(),
            "Store opened"
        );

        Ok(Self { path, data })
    }

    /// Returns the document path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, falling back to defaults on any failure.
    fn load(path: &Path) -> StoreData {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(data) => data,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt store document, starting fresh");
                    StoreData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read store document, starting fresh");
                StoreData::default()
            }
        }
    }

    /// Writes the full document back to disk.
    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

// ============================================================================
// Store - Bookmarks
// ============================================================================

impl Store {
    /// Adds or updates a bookmark.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn add_bookmark(&mut self, url: impl Into<String>, title: impl Into<String>) -> Result<()> {
        self.data.bookmarks.insert(url.into(), title.into());
        self.save()
    }

    /// Removes a bookmark by URL.
    ///
    /// Removing a URL that is not bookmarked is a no-op (but still saves).
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn remove_bookmark(&mut self, url: &str) -> Result<()> {
        self.data.bookmarks.remove(url);
        self.save()
    }

    /// Returns all bookmarks as (url, title) pairs.
    #[must_use]
    pub fn bookmarks(&self) -> Vec<(String, String)> {
        self.data
            .bookmarks
            .iter()
            .map(|(url, title)| (url.clone(), title.clone()))
            .collect()
    }

    /// Checks whether a URL is bookmarked.
    #[inline]
    #[must_use]
    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.data.bookmarks.contains_key(url)
    }
}

// ============================================================================
// Store - History
// ============================================================================

impl Store {
    /// Records a visit.
    ///
    /// Adjacent duplicates collapse: if the newest entry already has this
    /// URL, its timestamp is refreshed instead of inserting a new entry.
    /// The list is capped at 1000 entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn add_history(&mut self, url: impl Into<String>, title: impl Into<String>) -> Result<()> {
        self.add_history_at(url, title, now_millis())
    }

    /// Records a visit with an explicit timestamp.
    pub(crate) fn add_history_at(
        &mut self,
        url: impl Into<String>,
        title: impl Into<String>,
        timestamp: u64,
    ) -> Result<()> {
        let url = url.into();

        if let Some(last) = self.data.history.first_mut()
            && last.url == url
        {
            last.timestamp = timestamp;
        } else {
            self.data.history.insert(
                0,
                HistoryEntry {
                    url,
                    title: title.into(),
                    timestamp,
                },
            );
            self.data.history.truncate(HISTORY_CAP);
        }

        self.save()
    }

    /// Returns recent history, newest first, capped at 100 entries.
    #[must_use]
    pub fn recent_history(&self) -> Vec<HistoryEntry> {
        self.data
            .history
            .iter()
            .take(RECENT_LIMIT)
            .cloned()
            .collect()
    }

    /// Returns the total number of stored history entries.
    #[inline]
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.data.history.len()
    }

    /// Removes the exact (url, timestamp) history entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn remove_history(&mut self, url: &str, timestamp: u64) -> Result<()> {
        self.data
            .history
            .retain(|entry| !(entry.url == url && entry.timestamp == timestamp));
        self.save()
    }

    /// Clears all history.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn clear_history(&mut self) -> Result<()> {
        self.data.history.clear();
        self.save()
    }
}

// ============================================================================
// Store - Permissions
// ============================================================================

impl Store {
    /// Returns the persisted status for a (host, kind) pair, if any.
    #[must_use]
    pub fn permission(&self, host: &str, kind: PermissionKind) -> Option<PermissionStatus> {
        self.data
            .permissions
            .get(host)
            .and_then(|kinds| kinds.get(&kind))
            .copied()
    }

    /// Persists a status for a (host, kind) pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn set_permission(
        &mut self,
        host: impl Into<String>,
        kind: PermissionKind,
        status: PermissionStatus,
    ) -> Result<()> {
        self.data
            .permissions
            .entry(host.into())
            .or_default()
            .insert(kind, status);
        self.save()
    }

    /// Returns all persisted permissions for a host.
    #[must_use]
    pub fn permissions_for_host(&self, host: &str) -> Vec<(PermissionKind, PermissionStatus)> {
        self.data
            .permissions
            .get(host)
            .map(|kinds| kinds.iter().map(|(k, s)| (*k, *s)).collect())
            .unwrap_or_default()
    }

    /// Removes all persisted permissions for a host.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn remove_permissions_for_host(&mut self, host: &str) -> Result<()> {
        if self.data.permissions.remove(host).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Current time in epoch milliseconds.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
