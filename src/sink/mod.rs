//! Record sinks
//!
//! Every successfully built record is appended to all configured sinks
//! before the work item is marked processed, so a resumed run can at worst
//! duplicate the single record that was in flight when the process died.

mod csv;
mod store;

pub use csv::CsvSink;
pub use store::{JsonStoreSink, load_store};

use crate::record::CoachRecord;
use thiserror::Error;

/// Errors produced while appending records to an output file.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store file version {found} unsupported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Destination for completed records. Implementations must persist each
/// record durably before returning.
pub trait RecordSink {
    fn append(&mut self, record: &CoachRecord) -> SinkResult<()>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
