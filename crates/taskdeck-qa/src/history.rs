//! Local report history
//!
//! A bounded, most-recent-first log of past reports, kept on the device
//! next to the app. It is a convenience cache, never a source of truth:
//! loading tolerates a missing or corrupt file by starting empty, and
//! nothing ever reconciles it against the remote store.
//!
//! Writes go through a temp file and rename so a crash mid-write leaves
//! the previous file intact.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::QaError;

/// Bounded most-recent-first report log
#[derive(Debug)]
pub struct ReportHistory<T> {
    entries: VecDeque<T>,
    capacity: usize,
    path: Option<PathBuf>,
}

impl<T: Serialize + DeserializeOwned> ReportHistory<T> {
    /// An unpersisted history
    #[must_use]
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            path: None,
        }
    }

    /// Load a history from disk, starting empty when the file is
    /// missing or unreadable
    #[must_use]
    pub fn load(capacity: usize, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut entries = read_entries(&path).unwrap_or_default();
        entries.truncate(capacity);
        Self {
            entries,
            capacity,
            path: Some(path),
        }
    }

    /// Insert the newest entry, evicting the oldest once over capacity
    pub fn push(&mut self, entry: T) -> Result<(), QaError> {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        self.persist()
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// The newest entry
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Number of entries held
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn persist(&self) -> Result<(), QaError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(&self.entries)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn read_entries<T: DeserializeOwned>(path: &Path) -> Option<VecDeque<T>> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(entries) => Some(entries),
        Err(err) => {
            warn!(path = %path.display(), %err, "discarding unreadable report history");
            None
        }
    }
}
