//! Coach record model
//!
//! `CoachRecord` is an immutable snapshot of one scraped coach, fully
//! validated at construction time. Construction is fail-fast: a missing or
//! invalid source URL, an unrecognized certification, or a full name that
//! does not contain the first/last names rejects the whole record, while
//! invalid optional fields (website, email, phone, socials) are blanked out
//! with a diagnostic and construction proceeds.

mod name;
mod social;

pub use name::{affix_variations, extract_name, normalize_name};
pub use social::resolve_social_url;

use crate::validate::{is_valid_email, is_valid_phone, is_valid_url, validate_or_default};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Allow-lists for social URL resolution. The first domain of each list is
/// the one handles are resolved against.
const INSTAGRAM_SITES: [&str; 2] = ["instagram.com", "instagr.am"];
const LINKEDIN_SITES: [&str; 2] = ["linkedin.com", "linked.in"];
const TWITTER_SITES: [&str; 1] = ["twitter.com"];

/// Errors that reject a record at construction time
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Source url not provided or not a valid url: '{0}'")]
    InvalidSourceUrl(String),

    #[error("Unknown certification value: '{0}'")]
    UnknownCertification(String),

    #[error("Full name '{full_name}' must contain first name '{first_name}' and last name '{last_name}'")]
    FullNameMismatch {
        full_name: String,
        first_name: String,
        last_name: String,
    },
}

/// Tiered coaching certification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoachCert {
    Associate,
    Professional,
    Master,
    Life,
}

impl fmt::Display for CoachCert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = match self {
            CoachCert::Associate => "Associate Certified Coach",
            CoachCert::Professional => "Professional Certified Coach",
            CoachCert::Master => "Master Certified Coach",
            CoachCert::Life => "Life Coach School Certified",
        };
        write!(f, "{display}")
    }
}

/// Error returned when certification text matches no known tier
#[derive(Debug, Error)]
#[error("unrecognized certification text")]
pub struct ParseCertError;

impl FromStr for CoachCert {
    type Err = ParseCertError;

    /// Accepts the directory display names plus the short tokens the sites
    /// themselves use ("ACC", "PCC", "MCC").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "acc" | "associate" | "associate certified coach" => Ok(CoachCert::Associate),
            "pcc" | "professional" | "professional certified coach" => Ok(CoachCert::Professional),
            "mcc" | "master" | "master certified coach" => Ok(CoachCert::Master),
            "life" | "life coach school certified" => Ok(CoachCert::Life),
            _ => Err(ParseCertError),
        }
    }
}

/// Immutable snapshot of one coach. Constructed through [`CoachBuilder`]
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachRecord {
    source_url: String,
    first_name: String,
    last_name: String,
    full_name: String,
    certification: Option<CoachCert>,
    niche_description: String,
    website_url: String,
    email: String,
    phone: String,
    instagram_url: String,
    linkedin_url: String,
    twitter_url: String,
}

impl CoachRecord {
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn certification(&self) -> Option<CoachCert> {
        self.certification
    }

    /// Display string for the CSV export; empty when uncertified.
    pub fn certification_display(&self) -> String {
        self.certification
            .map(|cert| cert.to_string())
            .unwrap_or_default()
    }

    pub fn niche_description(&self) -> &str {
        &self.niche_description
    }

    pub fn website_url(&self) -> &str {
        &self.website_url
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn instagram_url(&self) -> &str {
        &self.instagram_url
    }

    pub fn linkedin_url(&self) -> &str {
        &self.linkedin_url
    }

    pub fn twitter_url(&self) -> &str {
        &self.twitter_url
    }
}

/// Builder over raw scraped strings. All validation happens in
/// [`CoachBuilder::build`].
#[derive(Debug, Default, Clone)]
pub struct CoachBuilder {
    source_url: String,
    first_name: String,
    last_name: String,
    full_name: String,
    certification: String,
    niche_description: String,
    website_url: String,
    email: String,
    phone: String,
    instagram: String,
    linkedin: String,
    twitter: String,
}

impl CoachBuilder {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Self::default()
        }
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = value.into();
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = value.into();
        self
    }

    pub fn full_name(mut self, value: impl Into<String>) -> Self {
        self.full_name = value.into();
        self
    }

    /// Raw certification text; empty means uncertified, unknown non-empty
    /// text fails construction.
    pub fn certification(mut self, value: impl Into<String>) -> Self {
        self.certification = value.into();
        self
    }

    pub fn niche_description(mut self, value: impl Into<String>) -> Self {
        self.niche_description = value.into();
        self
    }

    pub fn website_url(mut self, value: impl Into<String>) -> Self {
        self.website_url = value.into();
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = value.into();
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = value.into();
        self
    }

    pub fn instagram(mut self, value: impl Into<String>) -> Self {
        self.instagram = value.into();
        self
    }

    pub fn linkedin(mut self, value: impl Into<String>) -> Self {
        self.linkedin = value.into();
        self
    }

    pub fn twitter(mut self, value: impl Into<String>) -> Self {
        self.twitter = value.into();
        self
    }

    /// Validates every field and produces the finished record.
    ///
    /// Fatal: missing/invalid source URL, unknown certification text, or a
    /// full name that is not a case-insensitive super-string of the
    /// first/last names. The substring check is a known approximation (last
    /// name "Ann" matches a full name containing "Anna") and is preserved
    /// as-is.
    pub fn build(self) -> Result<CoachRecord, RecordError> {
        if self.source_url.is_empty() || !is_valid_url(&self.source_url) {
            return Err(RecordError::InvalidSourceUrl(self.source_url));
        }

        let certification = if self.certification.trim().is_empty() {
            None
        } else {
            Some(
                self.certification
                    .parse::<CoachCert>()
                    .map_err(|_| RecordError::UnknownCertification(self.certification.clone()))?,
            )
        };

        let full_lower = self.full_name.to_lowercase();
        if !full_lower.contains(&self.first_name.to_lowercase())
            || !full_lower.contains(&self.last_name.to_lowercase())
        {
            return Err(RecordError::FullNameMismatch {
                full_name: self.full_name,
                first_name: self.first_name,
                last_name: self.last_name,
            });
        }

        let website_url = validate_or_default(is_valid_url, &self.website_url, "");
        if website_url != self.website_url {
            tracing::warn!(
                input = %self.website_url,
                "invalid website url blanked out"
            );
        }

        let email = validate_or_default(is_valid_email, &self.email, "");
        if email != self.email {
            tracing::warn!(input = %self.email, "invalid email blanked out");
        }

        let phone = validate_or_default(is_valid_phone, &self.phone, "");
        if phone != self.phone {
            tracing::warn!(input = %self.phone, "invalid phone blanked out");
        }

        let instagram_url = resolve_social_url(&INSTAGRAM_SITES, &self.instagram, None);
        let linkedin_url = resolve_social_url(&LINKEDIN_SITES, &self.linkedin, Some("in"));
        let twitter_url = resolve_social_url(&TWITTER_SITES, &self.twitter, None);

        Ok(CoachRecord {
            source_url: self.source_url,
            first_name: self.first_name,
            last_name: self.last_name,
            full_name: self.full_name,
            certification,
            niche_description: self.niche_description,
            website_url,
            email,
            phone,
            instagram_url,
            linkedin_url,
            twitter_url,
        })
    }
}
