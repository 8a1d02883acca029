//! Durable work queue
//!
//! Tracks which discovery units (profile URLs) remain unprocessed across
//! process restarts. A key present in the queue has never been successfully
//! processed; absence means not-yet-discovered or done.
//!
//! Every mutation rewrites the entire mapping to a temporary sibling file
//! and atomically renames it over the canonical file, so a crash mid-write
//! never corrupts the canonical state: readers always observe either the
//! pre-mutation or post-mutation mapping. The canonical file's existence is
//! itself the initialization marker; there is no separate sentinel.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Work queue already initialized; delete '{0}' to reset")]
    AlreadyInitialized(PathBuf),

    #[error("Duplicate work item key: '{0}'")]
    DuplicateKey(String),

    #[error("Work item key not found: '{0}'")]
    KeyNotFound(String),

    #[error("Queue file version {found} unsupported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

const QUEUE_FILE_VERSION: u32 = 1;

/// One unit of crawlable identity plus the payload needed to resume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub key: String,
    pub payload: String,
}

/// On-disk schema of the canonical queue file. Items are an ordered array
/// so that insertion order survives the round trip.
#[derive(Debug, Serialize, Deserialize)]
struct QueueFile {
    version: u32,
    items: Vec<WorkItem>,
}

/// Crash-safe mapping of pending work-item keys to payloads.
pub struct WorkQueue {
    path: PathBuf,
    initialized: bool,
    items: Vec<WorkItem>,
}

impl WorkQueue {
    /// Opens a queue backed by `path`. When the canonical file exists its
    /// mapping is loaded as the resume point; otherwise the queue starts
    /// uninitialized and empty.
    pub fn open(path: impl Into<PathBuf>) -> QueueResult<Self> {
        let path = path.into();

        if path.is_file() {
            let bytes = fs::read(&path)?;
            let file: QueueFile = serde_json::from_slice(&bytes)?;
            if file.version != QUEUE_FILE_VERSION {
                return Err(QueueError::UnsupportedVersion {
                    found: file.version,
                    expected: QUEUE_FILE_VERSION,
                });
            }
            tracing::debug!(path = %path.display(), pending = file.items.len(), "loaded existing queue");
            Ok(Self {
                path,
                initialized: true,
                items: file.items,
            })
        } else {
            Ok(Self {
                path,
                initialized: false,
                items: Vec::new(),
            })
        }
    }

    /// True iff the canonical file existed at open or has been created this
    /// run. Pure query, idempotent.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Seeds the queue with the full set of work items and persists it
    /// durably. Fails when the queue is already initialized or when the
    /// item list repeats a key (the collection must be a mapping).
    pub fn initialize(&mut self, items: Vec<(String, String)>) -> QueueResult<()> {
        if self.initialized {
            return Err(QueueError::AlreadyInitialized(self.path.clone()));
        }

        let mut work_items: Vec<WorkItem> = Vec::with_capacity(items.len());
        for (key, payload) in items {
            if work_items.iter().any(|item| item.key == key) {
                return Err(QueueError::DuplicateKey(key));
            }
            work_items.push(WorkItem { key, payload });
        }

        self.items = work_items;
        self.persist()?;
        self.initialized = true;
        Ok(())
    }

    /// Removes `key` from the mapping and re-persists the full remaining
    /// state durably. Fails when the key is absent, which indicates a logic
    /// bug or corrupted resume state.
    pub fn mark_processed(&mut self, key: &str) -> QueueResult<()> {
        let index = self
            .items
            .iter()
            .position(|item| item.key == key)
            .ok_or_else(|| QueueError::KeyNotFound(key.to_string()))?;

        self.items.remove(index);
        self.persist()
    }

    /// Snapshot of the remaining work keys, in insertion order.
    pub fn pending_keys(&self) -> Vec<String> {
        self.items.iter().map(|item| item.key.clone()).collect()
    }

    /// Payload stored for a pending key, if any.
    pub fn payload(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.payload.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> QueueResult<()> {
        let file = QueueFile {
            version: QUEUE_FILE_VERSION,
            items: self.items.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&file)?;
        write_atomic(&self.path, &bytes)?;
        Ok(())
    }
}

/// Writes `bytes` to a temporary sibling of `path`, then atomically renames
/// it over `path`. A crash between the write and the rename leaves the
/// canonical file untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let temp_path = temp_sibling(path);
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(".tmp");
    PathBuf::from(raw)
}
