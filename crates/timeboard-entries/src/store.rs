use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::LoadError;
use crate::parser::load_jsonl;
use crate::types::TimeEntry;

/// An immutable, fully-parsed batch of entries and the time it was published.
#[derive(Debug, Default)]
pub struct Snapshot {
    entries: Vec<TimeEntry>,
    last_loaded: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `None` until the first successful load.
    pub fn last_loaded(&self) -> Option<DateTime<Utc>> {
        self.last_loaded
    }
}

/// Holds the current snapshot of time entries.
///
/// Each load parses into a brand-new batch before the lock is taken, then
/// swaps the published `Arc` in one step. Readers therefore see either the
/// old batch or the new one in full, and never wait on file I/O.
#[derive(Debug, Default)]
pub struct EntryStore {
    current: RwLock<Arc<Snapshot>>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSONL file at `path` and publish it as the current snapshot.
    /// On error the existing snapshot is left as it was.
    pub fn load(&self, path: &Path) -> Result<usize, LoadError> {
        let entries = load_jsonl(path)?;
        let count = entries.len();
        self.replace(entries);
        info!(entries = count, "loaded entries from {}", path.display());
        Ok(count)
    }

    /// Publish `entries` as the current snapshot, stamped with the current time.
    pub fn replace(&self, entries: Vec<TimeEntry>) {
        let snapshot = Arc::new(Snapshot {
            entries,
            last_loaded: Some(Utc::now()),
        });
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = snapshot;
    }

    /// The current snapshot. It is never mutated after publication, so the
    /// handle stays valid and unchanged across later loads.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// An independent copy of the current entries.
    pub fn entries(&self) -> Vec<TimeEntry> {
        self.snapshot().entries.clone()
    }

    pub fn count(&self) -> usize {
        self.snapshot().len()
    }

    pub fn last_loaded(&self) -> Option<DateTime<Utc>> {
        self.snapshot().last_loaded
    }
}
