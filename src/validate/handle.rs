use regex::Regex;
use std::sync::LazyLock;

// One token, optionally prefixed with `@`. The anchors reject emails,
// URLs, and anything with interior whitespace.
static HANDLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?[A-Za-z0-9_-]+$").expect("handle pattern compiles"));

/// Checks whether a trimmed string is a social-media handle.
pub fn is_valid_handle(handle: &str) -> bool {
    HANDLE_PATTERN.is_match(handle.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_without_at() {
        assert!(is_valid_handle("somehandle"));
    }

    #[test]
    fn test_handle_with_at() {
        assert!(is_valid_handle("@twitteruser"));
    }

    #[test]
    fn test_surrounding_whitespace_allowed() {
        assert!(is_valid_handle("  @thatguy  "));
    }

    #[test]
    fn test_reject_email() {
        assert!(!is_valid_handle("not_a_handle@gmail.com"));
    }

    #[test]
    fn test_reject_url() {
        assert!(!is_valid_handle("website.com"));
    }

    #[test]
    fn test_reject_multi_token() {
        assert!(!is_valid_handle("two words"));
        assert!(!is_valid_handle(""));
    }
}
