//! Watch progress and bookmarks for a single user session.
//!
//! The in-memory maps are authoritative. Every mutation is written through
//! to [`DurableStorage`] straight away, and a failed write only downgrades
//! the store to session-only persistence.

use crate::core::error::{ProgressError, StorageError};
use crate::core::models::ProgressStatus;
use crate::core::storage::DurableStorage;
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_PROGRESS_KEY: &str = "video_progress";
pub const DEFAULT_BOOKMARKS_KEY: &str = "video_bookmarks";

/// Names of the two persisted documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub progress: String,
    pub bookmarks: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            progress: DEFAULT_PROGRESS_KEY.to_string(),
            bookmarks: DEFAULT_BOOKMARKS_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceStatus {
    Healthy,
    /// Stored state could not be loaded; the store started empty.
    ReadFailed(String),
    /// The last write did not reach storage; state lives in memory only.
    WriteFailed(String),
}

/// Read-only access to progress state. Filtering and statistics only need
/// this, so they can run against any snapshot.
pub trait ProgressView {
    /// Stored percent for `item_id`, `0` when nothing is recorded.
    fn progress(&self, item_id: &str) -> u8;
    fn is_bookmarked(&self, item_id: &str) -> bool;

    fn is_completed(&self, item_id: &str) -> bool {
        self.progress(item_id) == 100
    }

    fn is_in_progress(&self, item_id: &str) -> bool {
        let percent = self.progress(item_id);
        percent > 0 && percent < 100
    }

    fn status(&self, item_id: &str) -> ProgressStatus {
        ProgressStatus::from_percent(self.progress(item_id))
    }
}

pub struct ProgressStore<S: DurableStorage> {
    storage: S,
    keys: StorageKeys,
    progress: BTreeMap<String, u8>,
    bookmarks: BTreeSet<String>,
    status: PersistenceStatus,
}

impl<S: DurableStorage> ProgressStore<S> {
    /// Loads persisted state. Never fails: a document that cannot be read
    /// or parsed is logged and replaced by empty state.
    pub fn open(storage: S, keys: StorageKeys) -> Self {
        let mut status = PersistenceStatus::Healthy;

        let progress = match load_progress(&storage, &keys.progress) {
            Ok(progress) => progress,
            Err(e) => {
                warn!("Could not load progress, starting empty: {e}");
                status = PersistenceStatus::ReadFailed(e.to_string());
                BTreeMap::new()
            }
        };

        let bookmarks = match load_bookmarks(&storage, &keys.bookmarks) {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                warn!("Could not load bookmarks, starting empty: {e}");
                status = PersistenceStatus::ReadFailed(e.to_string());
                BTreeSet::new()
            }
        };

        debug!(
            "Opened progress store with {} progress records and {} bookmarks",
            progress.len(),
            bookmarks.len()
        );

        Self {
            storage,
            keys,
            progress,
            bookmarks,
            status,
        }
    }

    pub fn persistence_status(&self) -> &PersistenceStatus {
        &self.status
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Stores `percent` rounded half-up and clamped to `0..=100`, returning
    /// the value actually stored.
    pub fn set_progress(&mut self, item_id: &str, percent: f64) -> Result<u8, ProgressError> {
        check_item_id(item_id)?;
        let percent = to_percent(percent)?;

        if percent == 0 {
            self.progress.remove(item_id);
        } else {
            self.progress.insert(item_id.to_string(), percent);
        }
        self.persist_progress();

        info!("Progress for '{item_id}' set to {percent}%");
        Ok(percent)
    }

    pub fn increment_progress(&mut self, item_id: &str, delta: f64) -> Result<u8, ProgressError> {
        if !delta.is_finite() {
            return Err(ProgressError::InvalidInput(format!(
                "progress delta must be a finite number, got {delta}"
            )));
        }
        let current = f64::from(self.progress(item_id));
        self.set_progress(item_id, current + delta)
    }

    /// Flips bookmark membership and returns the new state.
    pub fn toggle_bookmark(&mut self, item_id: &str) -> Result<bool, ProgressError> {
        check_item_id(item_id)?;

        let bookmarked = if self.bookmarks.remove(item_id) {
            false
        } else {
            self.bookmarks.insert(item_id.to_string());
            true
        };
        self.persist_bookmarks();

        info!("Bookmark for '{item_id}' is now {bookmarked}");
        Ok(bookmarked)
    }

    /// Forgets both progress and bookmark for one item.
    pub fn reset(&mut self, item_id: &str) -> Result<(), ProgressError> {
        check_item_id(item_id)?;

        if self.progress.remove(item_id).is_some() {
            self.persist_progress();
        }
        if self.bookmarks.remove(item_id) {
            self.persist_bookmarks();
        }

        info!("Reset progress and bookmark for '{item_id}'");
        Ok(())
    }

    fn persist_progress(&mut self) {
        let document = serde_json::to_string(&self.progress);
        let key = self.keys.progress.clone();
        self.persist(&key, document);
    }

    fn persist_bookmarks(&mut self) {
        let document = serde_json::to_string(&self.bookmarks);
        let key = self.keys.bookmarks.clone();
        self.persist(&key, document);
    }

    fn persist(&mut self, key: &str, document: serde_json::Result<String>) {
        let result = document
            .map_err(|e| StorageError::Serialize {
                key: key.to_string(),
                message: e.to_string(),
            })
            .and_then(|document| self.storage.write(key, &document));

        match result {
            Ok(()) => {
                debug!("Persisted '{key}'");
                self.status = PersistenceStatus::Healthy;
            }
            Err(e) => {
                warn!("Keeping '{key}' in memory only, write failed: {e}");
                self.status = PersistenceStatus::WriteFailed(e.to_string());
            }
        }
    }
}

impl<S: DurableStorage> ProgressView for ProgressStore<S> {
    fn progress(&self, item_id: &str) -> u8 {
        self.progress.get(item_id).copied().unwrap_or(0)
    }

    fn is_bookmarked(&self, item_id: &str) -> bool {
        self.bookmarks.contains(item_id)
    }
}

/// Parses user text such as `40`, `40%` or `12.5` into a percent value.
pub fn parse_percent(raw: &str) -> Result<f64, ProgressError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    let value: f64 = number
        .parse()
        .map_err(|_| ProgressError::InvalidInput(format!("'{raw}' is not a number")))?;

    if !value.is_finite() {
        return Err(ProgressError::InvalidInput(format!(
            "'{raw}' is not a finite number"
        )));
    }
    Ok(value)
}

fn to_percent(value: f64) -> Result<u8, ProgressError> {
    if !value.is_finite() {
        return Err(ProgressError::InvalidInput(format!(
            "progress must be a finite number, got {value}"
        )));
    }
    Ok(value.round().clamp(0.0, 100.0) as u8)
}

fn check_item_id(item_id: &str) -> Result<(), ProgressError> {
    if item_id.trim().is_empty() {
        return Err(ProgressError::InvalidInput(
            "item id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn load_progress<S: DurableStorage>(
    storage: &S,
    key: &str,
) -> Result<BTreeMap<String, u8>, StorageError> {
    let Some(document) = storage.read(key)? else {
        return Ok(BTreeMap::new());
    };

    let raw: BTreeMap<String, f64> =
        serde_json::from_str(&document).map_err(|e| StorageError::Parse {
            key: key.to_string(),
            message: e.to_string(),
        })?;

    // Values are clamped again in case the document was edited by hand.
    Ok(raw
        .into_iter()
        .filter_map(|(id, value)| to_percent(value).ok().map(|p| (id, p)))
        .filter(|(_, p)| *p > 0)
        .collect())
}

fn load_bookmarks<S: DurableStorage>(
    storage: &S,
    key: &str,
) -> Result<BTreeSet<String>, StorageError> {
    let Some(document) = storage.read(key)? else {
        return Ok(BTreeSet::new());
    };

    serde_json::from_str(&document).map_err(|e| StorageError::Parse {
        key: key.to_string(),
        message: e.to_string(),
    })
}
