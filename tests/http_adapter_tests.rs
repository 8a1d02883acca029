//! HTTP adapter tests against a local mock server

use coachmap::adapter::{DirectoryAdapter, SiteAdapter};
use coachmap::config::{DirectoryConfig, UserAgentConfig};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn directory_config(listing_url: String) -> DirectoryConfig {
    DirectoryConfig {
        listing_url,
        profile_link_selector: "a.profile".to_string(),
        name_selector: "h1.coach-name".to_string(),
        certification_selector: "span.cert".to_string(),
        niche_selector: "li.niche".to_string(),
        website_selector: "a.website".to_string(),
        email_selector: "a.email".to_string(),
        phone_selector: "span.phone".to_string(),
        instagram_selector: "a.instagram".to_string(),
        linkedin_selector: String::new(),
        twitter_selector: String::new(),
    }
}

fn user_agent_config() -> UserAgentConfig {
    UserAgentConfig {
        scraper_name: "coachmap-test".to_string(),
        scraper_version: "0.1.0".to_string(),
        contact_url: "https://example.com/about".to_string(),
        contact_email: "ops@example.com".to_string(),
    }
}

fn adapter_for(server: &MockServer) -> DirectoryAdapter {
    let listing_url = format!("{}/coaches/", server.uri());
    DirectoryAdapter::new(
        &directory_config(listing_url),
        &user_agent_config(),
        Duration::from_secs(5),
    )
    .unwrap()
}

const LISTING_BODY: &str = r#"
<html><body>
  <a class="profile" href="/coaches/rick">Rick Sanches</a>
  <a class="profile" href="/coaches/jeremy">Jeremy Long</a>
  <a class="profile" href="/coaches/rick">Rick Sanches (duplicate)</a>
  <a class="sidebar" href="/about">About</a>
</body></html>
"#;

const RICK_BODY: &str = r#"
<html><body>
  <h1 class="coach-name">Dr. Rick Sanches</h1>
  <span class="cert">PCC</span>
  <ul>
    <li class="niche">career</li>
    <li class="niche">life</li>
  </ul>
  <a class="website" href="https://ricksanches.com">My site</a>
  <a class="email" href="mailto:rick@sanches.com">Email me</a>
  <span class="phone">(385) 999-1233</span>
  <a class="instagram" href="https://instagram.com/ricksanches">IG</a>
</body></html>
"#;

#[tokio::test]
async fn test_discover_resolves_and_dedups_profile_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coaches/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_BODY))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    let keys = adapter.discover().await.unwrap();

    assert_eq!(
        keys,
        vec![
            format!("{}/coaches/rick", server.uri()),
            format!("{}/coaches/jeremy", server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_extract_scrapes_configured_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coaches/rick"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RICK_BODY))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    let key = format!("{}/coaches/rick", server.uri());
    let profile = adapter.extract(&key).await.unwrap();

    assert_eq!(profile.display_name, "Dr. Rick Sanches");
    assert_eq!(profile.certification, "PCC");
    assert_eq!(profile.niche_description, "career, life");
    assert_eq!(profile.website_url, "https://ricksanches.com");
    assert_eq!(profile.email, "rick@sanches.com");
    assert_eq!(profile.phone, "(385) 999-1233");
    assert_eq!(profile.instagram, "https://instagram.com/ricksanches");
    // No selector configured for these.
    assert_eq!(profile.linkedin, "");
    assert_eq!(profile.twitter, "");
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coaches/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    let err = adapter.discover().await.err().unwrap();
    assert!(err.is_transient());
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_missing_name_element_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coaches/empty"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>nothing</p></body></html>"),
        )
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    let key = format!("{}/coaches/empty", server.uri());
    let err = adapter.extract(&key).await.err().unwrap();
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_identifying_user_agent_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coaches/"))
        .and(header(
            "user-agent",
            "coachmap-test/0.1.0 (+https://example.com/about; ops@example.com)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_BODY))
        .mount(&server)
        .await;

    // The mock only matches when the user-agent header is present, so a
    // successful discovery proves the header was sent.
    let adapter = adapter_for(&server);
    assert!(adapter.discover().await.is_ok());
}
