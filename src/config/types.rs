use serde::Deserialize;

/// Main configuration structure for Coachmap
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub directory: DirectoryConfig,
    pub output: OutputConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Maximum number of attempts per fetch before giving up
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Pause between retry attempts (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,

    /// What to do with a work item whose retries are exhausted
    #[serde(rename = "failure-policy", default)]
    pub failure_policy: FailurePolicy,

    /// Per-request timeout (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,
}

/// What happens when a single work item exhausts its retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure, leave the item pending, move on to the next one
    #[default]
    Skip,
    /// Stop the whole run; the item stays pending for a later resume
    Abort,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the scraper
    #[serde(rename = "scraper-name")]
    pub scraper_name: String,

    /// Version of the scraper
    #[serde(rename = "scraper-version")]
    pub scraper_version: String,

    /// URL with information about the scraper
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for scraper-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Directory site configuration: where the listing lives and which CSS
/// selectors locate each profile field. Optional selectors left empty mean
/// the site does not publish that field.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// URL of the listing page enumerating profile links
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Selector matching the anchor elements linking to profile pages
    #[serde(rename = "profile-link-selector")]
    pub profile_link_selector: String,

    /// Selector for the coach's display name on a profile page
    #[serde(rename = "name-selector")]
    pub name_selector: String,

    #[serde(rename = "certification-selector", default)]
    pub certification_selector: String,

    #[serde(rename = "niche-selector", default)]
    pub niche_selector: String,

    #[serde(rename = "website-selector", default)]
    pub website_selector: String,

    #[serde(rename = "email-selector", default)]
    pub email_selector: String,

    #[serde(rename = "phone-selector", default)]
    pub phone_selector: String,

    #[serde(rename = "instagram-selector", default)]
    pub instagram_selector: String,

    #[serde(rename = "linkedin-selector", default)]
    pub linkedin_selector: String,

    #[serde(rename = "twitter-selector", default)]
    pub twitter_selector: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the work queue state file
    #[serde(rename = "queue-path")]
    pub queue_path: String,

    /// Path to the CSV output file
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path to the JSON record store
    #[serde(rename = "store-path")]
    pub store_path: String,
}
