//! Coachmap: a resumable coach-directory scraper
//!
//! This crate implements a scraper for professional-coach directory sites.
//! Profile URLs are discovered once, tracked in a crash-safe work queue, and
//! each profile is extracted, validated, and appended to a CSV export plus a
//! durable JSON record store. An interrupted run resumes from the queue file
//! without reprocessing completed work.

pub mod adapter;
pub mod config;
pub mod crawler;
pub mod queue;
pub mod record;
pub mod retry;
pub mod sink;
pub mod validate;

use thiserror::Error;

/// Main error type for coachmap operations
#[derive(Debug, Error)]
pub enum CoachmapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Work queue error: {0}")]
    Queue(#[from] queue::QueueError),

    #[error("Adapter error: {0}")]
    Adapter(#[from] adapter::AdapterError),

    #[error("Sink error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("Record error: {0}")]
    Record(#[from] record::RecordError),

    #[error("Discovery failed after {attempts} attempts: {last_error}")]
    DiscoveryExhausted { attempts: u32, last_error: String },

    #[error("Extraction of '{key}' failed after {attempts} attempts: {last_error}")]
    ExtractionExhausted {
        key: String,
        attempts: u32,
        last_error: String,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for coachmap operations
pub type Result<T> = std::result::Result<T, CoachmapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use queue::WorkQueue;
pub use record::{CoachBuilder, CoachCert, CoachRecord};
