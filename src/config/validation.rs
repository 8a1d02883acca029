use crate::config::types::{
    Config, DirectoryConfig, OutputConfig, ScraperConfig, UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_directory_config(&config.directory)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.retry_backoff_ms < 50 {
        return Err(ConfigError::Validation(format!(
            "retry_backoff_ms must be >= 50ms, got {}ms",
            config.retry_backoff_ms
        )));
    }

    if config.request_timeout_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_ms must be >= 1000ms, got {}ms",
            config.request_timeout_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate scraper name: non-empty, alphanumeric + hyphens only
    if config.scraper_name.is_empty() {
        return Err(ConfigError::Validation(
            "scraper_name cannot be empty".to_string(),
        ));
    }

    if !config
        .scraper_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "scraper_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.scraper_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates directory configuration
fn validate_directory_config(config: &DirectoryConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.listing_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "listing_url must use an http or https scheme, got '{}'",
            url.scheme()
        )));
    }

    if config.profile_link_selector.is_empty() {
        return Err(ConfigError::Validation(
            "profile_link_selector cannot be empty".to_string(),
        ));
    }

    if config.name_selector.is_empty() {
        return Err(ConfigError::Validation(
            "name_selector cannot be empty".to_string(),
        ));
    }

    let selectors = [
        ("profile-link-selector", &config.profile_link_selector),
        ("name-selector", &config.name_selector),
        ("certification-selector", &config.certification_selector),
        ("niche-selector", &config.niche_selector),
        ("website-selector", &config.website_selector),
        ("email-selector", &config.email_selector),
        ("phone-selector", &config.phone_selector),
        ("instagram-selector", &config.instagram_selector),
        ("linkedin-selector", &config.linkedin_selector),
        ("twitter-selector", &config.twitter_selector),
    ];

    for (field, raw) in selectors {
        if raw.is_empty() {
            continue;
        }
        Selector::parse(raw).map_err(|e| {
            ConfigError::InvalidSelector(format!("Invalid {} '{}': {:?}", field, raw, e))
        })?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.queue_path.is_empty() {
        return Err(ConfigError::Validation(
            "queue_path cannot be empty".to_string(),
        ));
    }

    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    if config.store_path.is_empty() {
        return Err(ConfigError::Validation(
            "store_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
