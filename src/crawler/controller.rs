//! Sequential crawl controller
//!
//! Drives one work item at a time: discover-and-seed on the first run,
//! then extract, build, append, and mark processed for each pending key.
//! Ordering is the durability contract — a record reaches every sink
//! before its work item is marked processed, so a crash can at worst
//! duplicate the record that was in flight.

use crate::adapter::{AdapterError, RawProfile, SiteAdapter};
use crate::config::FailurePolicy;
use crate::queue::WorkQueue;
use crate::record::{extract_name, normalize_name, CoachBuilder, CoachRecord, RecordError};
use crate::retry::{run_with_retry, Attempt, RetryOutcome, RetryPolicy};
use crate::sink::RecordSink;
use crate::CoachmapError;
use std::time::Instant;

const PROGRESS_INTERVAL: usize = 10;

/// Counters for one crawl run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Items fully processed and removed from the queue
    pub processed: usize,
    /// Items skipped after exhausting retries; still pending
    pub skipped: usize,
    /// Items whose scraped data failed record validation; still pending
    pub rejected: usize,
}

enum ItemOutcome {
    Processed,
    Skipped,
    Rejected,
}

/// Orchestrates a crawl over any adapter and sink set.
pub struct Controller<A: SiteAdapter> {
    adapter: A,
    queue: WorkQueue,
    sinks: Vec<Box<dyn RecordSink>>,
    policy: RetryPolicy,
    failure_policy: FailurePolicy,
}

impl<A: SiteAdapter> Controller<A> {
    pub fn new(
        adapter: A,
        queue: WorkQueue,
        sinks: Vec<Box<dyn RecordSink>>,
        policy: RetryPolicy,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            adapter,
            queue,
            sinks,
            policy,
            failure_policy,
        }
    }

    /// Runs the crawl to completion: seeds the queue if this is a fresh
    /// start, then works through every pending item.
    pub async fn run(&mut self) -> crate::Result<CrawlStats> {
        self.ensure_initialized().await?;

        let keys = self.queue.pending_keys();
        let total = keys.len();
        tracing::info!(pending = total, "starting crawl");

        let started = Instant::now();
        let mut stats = CrawlStats::default();

        for (index, key) in keys.iter().enumerate() {
            match self.process_item(key).await? {
                ItemOutcome::Processed => stats.processed += 1,
                ItemOutcome::Skipped => stats.skipped += 1,
                ItemOutcome::Rejected => stats.rejected += 1,
            }

            let done = index + 1;
            if done % PROGRESS_INTERVAL == 0 || done == total {
                let elapsed = started.elapsed().as_secs_f64();
                let rate = if elapsed > 0.0 {
                    done as f64 / elapsed
                } else {
                    0.0
                };
                tracing::info!(done, total, rate = format!("{rate:.2}/s"), "crawl progress");
            }
        }

        tracing::info!(
            processed = stats.processed,
            skipped = stats.skipped,
            rejected = stats.rejected,
            "crawl finished"
        );
        Ok(stats)
    }

    /// Seeds the queue from discovery when no queue file exists yet. A
    /// queue initialized by a previous run is resumed as-is; discovery is
    /// never repeated.
    async fn ensure_initialized(&mut self) -> crate::Result<()> {
        if self.queue.is_initialized() {
            tracing::info!(
                pending = self.queue.len(),
                path = %self.queue.path().display(),
                "resuming existing work queue"
            );
            return Ok(());
        }

        let adapter = &self.adapter;
        let outcome = run_with_retry(self.policy, || async move {
            match adapter.discover().await {
                Ok(keys) => Attempt::Ok(keys),
                Err(e) if e.is_transient() => Attempt::Retryable(e.to_string()),
                Err(e) => Attempt::Fatal(e.to_string()),
            }
        })
        .await;

        match outcome {
            RetryOutcome::Ok(keys) => {
                tracing::info!(discovered = keys.len(), "seeding work queue");
                // Profile URL doubles as key and payload.
                let items = keys.into_iter().map(|key| (key.clone(), key)).collect();
                self.queue.initialize(items)?;
                Ok(())
            }
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => Err(CoachmapError::DiscoveryExhausted {
                attempts,
                last_error,
            }),
            RetryOutcome::Fatal(message) => {
                Err(CoachmapError::Adapter(AdapterError::Structural(message)))
            }
        }
    }

    async fn process_item(&mut self, key: &str) -> crate::Result<ItemOutcome> {
        let adapter = &self.adapter;
        let outcome = run_with_retry(self.policy, || async move {
            match adapter.extract(key).await {
                Ok(profile) => Attempt::Ok(profile),
                Err(e) if e.is_transient() => Attempt::Retryable(e.to_string()),
                Err(e) => Attempt::Fatal(e.to_string()),
            }
        })
        .await;

        let profile = match outcome {
            RetryOutcome::Ok(profile) => profile,
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                return match self.failure_policy {
                    FailurePolicy::Skip => {
                        tracing::warn!(
                            key,
                            attempts,
                            %last_error,
                            "retries exhausted, skipping item"
                        );
                        Ok(ItemOutcome::Skipped)
                    }
                    FailurePolicy::Abort => Err(CoachmapError::ExtractionExhausted {
                        key: key.to_string(),
                        attempts,
                        last_error,
                    }),
                };
            }
            RetryOutcome::Fatal(message) => {
                return Err(CoachmapError::Adapter(AdapterError::Structural(message)));
            }
        };

        let record = match build_record(key, &profile) {
            Ok(record) => record,
            Err(error) => {
                // The item stays pending; a rerun after fixing the data or
                // the selectors will pick it up again.
                tracing::error!(key, %error, "scraped profile failed validation");
                return Ok(ItemOutcome::Rejected);
            }
        };

        for sink in &mut self.sinks {
            sink.append(&record)?;
            tracing::debug!(key, sink = sink.name(), "record appended");
        }

        self.queue.mark_processed(key)?;
        Ok(ItemOutcome::Processed)
    }
}

/// Builds a validated record out of a raw scraped profile.
pub fn build_record(source_url: &str, raw: &RawProfile) -> Result<CoachRecord, RecordError> {
    let (first, last) = extract_name(&raw.display_name);

    CoachBuilder::new(source_url)
        .first_name(normalize_name(&first))
        .last_name(normalize_name(&last))
        .full_name(normalize_name(&raw.display_name))
        .certification(&raw.certification)
        .niche_description(&raw.niche_description)
        .website_url(&raw.website_url)
        .email(&raw.email)
        .phone(&raw.phone)
        .instagram(&raw.instagram)
        .linkedin(&raw.linkedin)
        .twitter(&raw.twitter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_profile() -> RawProfile {
        RawProfile {
            display_name: "Dr. Rick Sanches".to_string(),
            certification: "pcc".to_string(),
            niche_description: "career".to_string(),
            website_url: "https://ricksanches.com".to_string(),
            email: "rick@sanches.com".to_string(),
            phone: "(385) 999-1233".to_string(),
            instagram: "@ricksanches".to_string(),
            linkedin: "https://linkedin.com/in/ricksanches".to_string(),
            twitter: String::new(),
        }
    }

    #[test]
    fn test_build_record_normalizes_and_resolves() {
        let record = build_record("https://example.com/coaches/rick", &raw_profile()).unwrap();

        assert_eq!(record.first_name(), "Rick");
        assert_eq!(record.last_name(), "Sanches");
        assert_eq!(record.certification_display(), "Professional Certified Coach");
        assert_eq!(record.phone(), "(385) 999-1233");
        assert_eq!(record.instagram_url(), "https://instagram.com/ricksanches");
        assert_eq!(record.twitter_url(), "");
    }

    #[test]
    fn test_build_record_rejects_unknown_certification() {
        let mut raw = raw_profile();
        raw.certification = "grandmaster".to_string();
        assert!(build_record("https://example.com/coaches/rick", &raw).is_err());
    }

    #[test]
    fn test_build_record_rejects_bad_source_url() {
        assert!(build_record("not a url", &raw_profile()).is_err());
    }
}
