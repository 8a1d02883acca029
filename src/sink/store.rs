//! JSON record store
//!
//! Canonical machine-readable list of every record produced so far. Unlike
//! the CSV sink this file is rewritten whole on each append, through the
//! same atomic replace used by the work queue, so it is always parseable.

use super::{RecordSink, SinkError, SinkResult};
use crate::queue::write_atomic;
use crate::record::CoachRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const STORE_FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    records: Vec<CoachRecord>,
}

/// Reads all records from a store file. A missing file is an empty store.
pub fn load_store(path: &Path) -> SinkResult<Vec<CoachRecord>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let bytes = fs::read(path)?;
    let file: StoreFile = serde_json::from_slice(&bytes)?;
    if file.version != STORE_FILE_VERSION {
        return Err(SinkError::UnsupportedVersion {
            found: file.version,
            expected: STORE_FILE_VERSION,
        });
    }
    Ok(file.records)
}

/// Appends records to a versioned JSON list, atomically rewriting the file
/// on each append.
pub struct JsonStoreSink {
    path: PathBuf,
    records: Vec<CoachRecord>,
}

impl JsonStoreSink {
    /// Opens the sink, loading any records a previous run already stored.
    pub fn open(path: impl Into<PathBuf>) -> SinkResult<Self> {
        let path = path.into();
        let records = load_store(&path)?;
        Ok(Self { path, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSink for JsonStoreSink {
    fn append(&mut self, record: &CoachRecord) -> SinkResult<()> {
        self.records.push(record.clone());
        let file = StoreFile {
            version: STORE_FILE_VERSION,
            records: self.records.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&file)?;
        write_atomic(&self.path, &bytes)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json-store"
    }
}
