//! Crawl orchestration
//!
//! Wires the configured adapter, work queue, retry policy, and sinks into a
//! single sequential run. The controller itself is generic over the adapter
//! and sink traits; this module's [`crawl`] entry point binds them to the
//! HTTP adapter and file sinks described by the config.

mod controller;

pub use controller::{build_record, Controller, CrawlStats};

use crate::adapter::DirectoryAdapter;
use crate::config::Config;
use crate::queue::WorkQueue;
use crate::retry::RetryPolicy;
use crate::sink::{CsvSink, JsonStoreSink, RecordSink};
use std::time::Duration;

/// Runs a full (or resumed) crawl described by `config`.
pub async fn crawl(config: Config) -> crate::Result<CrawlStats> {
    let timeout = Duration::from_millis(config.scraper.request_timeout_ms);
    let adapter = DirectoryAdapter::new(&config.directory, &config.user_agent, timeout)?;

    let queue = WorkQueue::open(&config.output.queue_path)?;

    let sinks: Vec<Box<dyn RecordSink>> = vec![
        Box::new(CsvSink::open(&config.output.csv_path)?),
        Box::new(JsonStoreSink::open(&config.output.store_path)?),
    ];

    let policy = RetryPolicy::new(
        config.scraper.max_retries,
        Duration::from_millis(config.scraper.retry_backoff_ms),
    );

    let mut controller = Controller::new(
        adapter,
        queue,
        sinks,
        policy,
        config.scraper.failure_policy,
    );
    controller.run().await
}
