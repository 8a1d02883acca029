use regex::Regex;
use std::sync::LazyLock;

// Optional scheme, dotted hostname / localhost / IPv4 literal, optional
// port, optional path or query with no unescaped whitespace.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:http|ftp)s?://)?(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$",
    )
    .expect("url pattern compiles")
});

/// Checks whether a string looks like a web URL. The scheme is optional so
/// that bare hostnames scraped from directory pages ("coachone.com") pass.
pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_url() {
        assert!(is_valid_url("http://google.com"));
    }

    #[test]
    fn test_www_url() {
        assert!(is_valid_url("http://www.yourmom.com"));
    }

    #[test]
    fn test_schemeless_url() {
        assert!(is_valid_url("hi.com"));
    }

    #[test]
    fn test_subdomain() {
        assert!(is_valid_url("hi.there.com"));
    }

    #[test]
    fn test_subdomain_with_query() {
        assert!(is_valid_url("hi.there.com/specific_resource?sfjdd=8&fddd=2"));
    }

    #[test]
    fn test_localhost_and_ip() {
        assert!(is_valid_url("localhost:8080"));
        assert!(is_valid_url("127.0.0.1/status"));
    }

    #[test]
    fn test_reject_whitespace_in_path() {
        assert!(!is_valid_url("hi.com/ rejected"));
    }

    #[test]
    fn test_reject_non_url() {
        assert!(!is_valid_url("notawebsite/hello"));
        assert!(!is_valid_url(""));
    }
}
