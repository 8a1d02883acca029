use regex::Regex;
use std::sync::LazyLock;

// 7, 10, or 11 digits: optional leading country code 1, optional area code.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1?(?:[0-9]{3})?[0-9]{7}$").expect("phone pattern compiles"));

/// Strips the punctuation commonly found in scraped phone numbers:
/// `+ . - ( )`, spaces, and tabs.
pub fn strip_phone_punctuation(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, '+' | '.' | '-' | '(' | ')' | ' ' | '\t'))
        .collect()
}

/// Checks whether a string is a plausible North American phone number after
/// punctuation stripping.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(&strip_phone_punctuation(phone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuated_phone() {
        assert!(is_valid_phone("+1 (801).888.8888"));
    }

    #[test]
    fn test_seven_digit_phone() {
        assert!(is_valid_phone("655-4406"));
    }

    #[test]
    fn test_reject_trailing_garbage() {
        assert!(!is_valid_phone("888 888 8888 hi"));
    }

    #[test]
    fn test_strip_parenthesis() {
        assert_eq!(strip_phone_punctuation("(385) 999 1233"), "3859991233");
    }

    #[test]
    fn test_strip_dashes() {
        assert_eq!(strip_phone_punctuation("123-456-7890"), "1234567890");
    }

    #[test]
    fn test_strip_country_code_plus() {
        assert_eq!(strip_phone_punctuation("+1 123-456-7890"), "11234567890");
    }
}
