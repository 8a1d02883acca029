//! Social-media URL resolution
//!
//! Raw scraped inputs are either full profile URLs, bare handles, or junk.
//! Resolution scopes a URL to an allow-list of site domains and builds a
//! canonical profile URL out of a handle.

use crate::validate::{is_valid_handle, is_valid_url};

/// Resolves a raw social-media string against an allow-list of site domains.
///
/// - empty input resolves to empty, with no diagnostic
/// - a valid URL is accepted verbatim only when it contains one of the
///   allowed domains (case-insensitive substring); otherwise it resolves to
///   empty with a warning
/// - a valid handle (optionally `@`-prefixed) is turned into
///   `https://<first-domain>[/<prefix>]/<handle>`; the first domain in the
///   allow-list is authoritative, so order matters
/// - anything else resolves to empty with a warning
pub fn resolve_social_url(site_domains: &[&str], raw: &str, handle_prefix: Option<&str>) -> String {
    // Callers always pass a compile-time allow-list.
    debug_assert!(!site_domains.is_empty(), "site domain allow-list is empty");

    let input = raw.trim();
    if input.is_empty() {
        return String::new();
    }

    let lowered = input.to_lowercase();

    if is_valid_url(input) {
        if site_domains
            .iter()
            .any(|domain| lowered.contains(&domain.to_lowercase()))
        {
            input.to_string()
        } else {
            tracing::warn!(
                input,
                sites = ?site_domains,
                "social media url doesn't match provided sites"
            );
            String::new()
        }
    } else if is_valid_handle(input) {
        let handle = input.strip_prefix('@').unwrap_or(input);
        let prefix = handle_prefix
            .map(|p| format!("/{p}"))
            .unwrap_or_default();
        let constructed = format!(
            "https://{}{}/{}",
            site_domains[0].to_lowercase(),
            prefix,
            handle
        );
        tracing::debug!(handle, url = %constructed, "constructed social url from handle");
        constructed
    } else {
        tracing::warn!(input, "social media ignored: not a valid site or handle");
        String::new()
    }
}
