//! HTTP directory adapter
//!
//! Scrapes a configured directory site: one listing page enumerating
//! profile links, then one page per profile. All field locations come from
//! CSS selectors in the config, so pointing the scraper at a new directory
//! is a config change, not a code change.
//!
//! `scraper::Html` is not `Send`, so the async methods only fetch body
//! strings; parsing happens in synchronous helpers that never hold a
//! document across an await point.

use super::{AdapterError, RawProfile, SiteAdapter};
use crate::config::{DirectoryConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Selector-driven adapter for one directory site.
pub struct DirectoryAdapter {
    client: Client,
    listing_url: Url,
    profile_link: Selector,
    name: Selector,
    certification: Option<Selector>,
    niche: Option<Selector>,
    website: Option<Selector>,
    email: Option<Selector>,
    phone: Option<Selector>,
    instagram: Option<Selector>,
    linkedin: Option<Selector>,
    twitter: Option<Selector>,
}

impl DirectoryAdapter {
    pub fn new(
        directory: &DirectoryConfig,
        user_agent: &UserAgentConfig,
        timeout: Duration,
    ) -> Result<Self, AdapterError> {
        let agent = format!(
            "{}/{} (+{}; {})",
            user_agent.scraper_name,
            user_agent.scraper_version,
            user_agent.contact_url,
            user_agent.contact_email
        );

        let client = Client::builder()
            .user_agent(agent)
            .timeout(timeout)
            .connect_timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| AdapterError::Structural(format!("HTTP client build failed: {e}")))?;

        let listing_url = Url::parse(&directory.listing_url).map_err(|e| {
            AdapterError::Structural(format!(
                "invalid listing url '{}': {e}",
                directory.listing_url
            ))
        })?;

        Ok(Self {
            client,
            listing_url,
            profile_link: required_selector("profile-link", &directory.profile_link_selector)?,
            name: required_selector("name", &directory.name_selector)?,
            certification: optional_selector("certification", &directory.certification_selector)?,
            niche: optional_selector("niche", &directory.niche_selector)?,
            website: optional_selector("website", &directory.website_selector)?,
            email: optional_selector("email", &directory.email_selector)?,
            phone: optional_selector("phone", &directory.phone_selector)?,
            instagram: optional_selector("instagram", &directory.instagram_selector)?,
            linkedin: optional_selector("linkedin", &directory.linkedin_selector)?,
            twitter: optional_selector("twitter", &directory.twitter_selector)?,
        })
    }

    async fn fetch(&self, url: &str) -> Result<String, AdapterError> {
        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Transient(format!("HTTP {status} for {url}")));
        }

        response.text().await.map_err(classify)
    }

    /// Extracts deduplicated absolute profile URLs from a listing page.
    fn parse_listing(&self, body: &str) -> Result<Vec<String>, AdapterError> {
        let document = Html::parse_document(body);
        let mut keys: Vec<String> = Vec::new();

        for element in document.select(&self.profile_link) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            match self.listing_url.join(href) {
                Ok(absolute) => {
                    let key = absolute.to_string();
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
                Err(error) => {
                    tracing::debug!(href, %error, "skipping unjoinable profile link");
                }
            }
        }

        if keys.is_empty() {
            return Err(AdapterError::Transient(format!(
                "no profile links found on {}",
                self.listing_url
            )));
        }

        Ok(keys)
    }

    fn parse_profile(&self, body: &str, key: &str) -> Result<RawProfile, AdapterError> {
        let document = Html::parse_document(body);

        let display_name = select_text(&document, &self.name).ok_or_else(|| {
            AdapterError::Transient(format!("name element missing on {key}"))
        })?;

        let mut profile = RawProfile {
            display_name,
            ..RawProfile::default()
        };

        if let Some(selector) = &self.certification {
            profile.certification = select_text(&document, selector).unwrap_or_default();
        }
        if let Some(selector) = &self.niche {
            // Directories often spread the niche over several elements.
            let parts: Vec<String> = document
                .select(selector)
                .map(|el| collapse_text(el.text()))
                .filter(|text| !text.is_empty())
                .collect();
            profile.niche_description = parts.join(", ");
        }
        if let Some(selector) = &self.website {
            profile.website_url = select_link(&document, selector).unwrap_or_default();
        }
        if let Some(selector) = &self.email {
            profile.email = select_link(&document, selector)
                .map(|raw| raw.strip_prefix("mailto:").unwrap_or(&raw).to_string())
                .unwrap_or_default();
        }
        if let Some(selector) = &self.phone {
            profile.phone = select_text(&document, selector).unwrap_or_default();
        }
        if let Some(selector) = &self.instagram {
            profile.instagram = select_link(&document, selector).unwrap_or_default();
        }
        if let Some(selector) = &self.linkedin {
            profile.linkedin = select_link(&document, selector).unwrap_or_default();
        }
        if let Some(selector) = &self.twitter {
            profile.twitter = select_link(&document, selector).unwrap_or_default();
        }

        Ok(profile)
    }
}

#[async_trait]
impl SiteAdapter for DirectoryAdapter {
    async fn discover(&self) -> Result<Vec<String>, AdapterError> {
        let listing = self.listing_url.to_string();
        tracing::info!(url = %listing, "fetching directory listing");
        let body = self.fetch(&listing).await?;
        self.parse_listing(&body)
    }

    async fn extract(&self, key: &str) -> Result<RawProfile, AdapterError> {
        tracing::debug!(url = %key, "fetching profile page");
        let body = self.fetch(key).await?;
        self.parse_profile(&body, key)
    }
}

fn classify(error: reqwest::Error) -> AdapterError {
    if error.is_timeout() || error.is_connect() {
        AdapterError::Transient(error.to_string())
    } else if error.is_builder() {
        AdapterError::Structural(error.to_string())
    } else {
        AdapterError::Transient(error.to_string())
    }
}

fn required_selector(field: &str, raw: &str) -> Result<Selector, AdapterError> {
    Selector::parse(raw)
        .map_err(|e| AdapterError::Structural(format!("invalid {field} selector '{raw}': {e:?}")))
}

fn optional_selector(field: &str, raw: &str) -> Result<Option<Selector>, AdapterError> {
    if raw.is_empty() {
        Ok(None)
    } else {
        required_selector(field, raw).map(Some)
    }
}

fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .map(|el| collapse_text(el.text()))
        .find(|text| !text.is_empty())
}

/// Prefers an `href` attribute, falling back to the element text. Covers
/// both `<a href=...>` markup and plain-text URLs.
fn select_link(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .filter_map(|el| match el.value().attr("href") {
            Some(href) => Some(href.trim().to_string()),
            None => {
                let text = collapse_text(el.text());
                (!text.is_empty()).then_some(text)
            }
        })
        .next()
}

fn collapse_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
