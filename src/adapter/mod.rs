//! Site adapters
//!
//! An adapter knows one directory site: how to enumerate its profile URLs
//! and how to pull the raw field values out of a single profile page. The
//! crawl controller is generic over this trait so tests can drive it with
//! a scripted adapter instead of a live HTTP server.

mod http;

pub use http::DirectoryAdapter;

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a discovery or extraction call, classified by whether a
/// retry could plausibly succeed.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Network-shaped failure: timeouts, connection resets, 5xx responses.
    #[error("transient failure: {0}")]
    Transient(String),

    /// The site's structure does not match expectations: a required
    /// selector found nothing, a URL would not parse. Retrying cannot help.
    #[error("structural failure: {0}")]
    Structural(String),
}

impl AdapterError {
    pub fn is_transient(&self) -> bool {
        matches!(self, AdapterError::Transient(_))
    }
}

/// Raw per-profile field values, exactly as scraped. Validation and
/// normalization happen later, in the record builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProfile {
    pub display_name: String,
    pub certification: String,
    pub niche_description: String,
    pub website_url: String,
    pub email: String,
    pub phone: String,
    pub instagram: String,
    pub linkedin: String,
    pub twitter: String,
}

/// One directory site's scraping surface.
#[async_trait]
pub trait SiteAdapter {
    /// Enumerates the profile URLs the site lists, deduplicated, in
    /// listing order.
    async fn discover(&self) -> Result<Vec<String>, AdapterError>;

    /// Fetches the profile page behind `key` and scrapes its raw fields.
    async fn extract(&self, key: &str) -> Result<RawProfile, AdapterError>;
}
