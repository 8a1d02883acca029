//! Name extraction from scraped display names
//!
//! Directory listings decorate names with professional affixes ("Dr.",
//! "PhD", "PCC") and comma-separated suffix clauses. Extraction strips the
//! decoration and picks a first/last pair out of what remains.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Title and suffix tokens stripped during extraction.
const AFFIXES: [&str; 12] = [
    "dr", "mba", "ma", "md", "ra", "phd", "rn", "msa", "pcc", "mr", "ms", "mrs",
];

static ALL_AFFIX_VARIANTS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut variants = HashSet::new();
    for affix in AFFIXES {
        variants.extend(affix_variations(affix));
    }
    variants
});

/// Expands an affix into every punctuation variant produced by optionally
/// inserting a `.` after each letter, e.g. `dr` -> {dr, dr., d.r, d.r.}.
pub fn affix_variations(affix: &str) -> HashSet<String> {
    let letters: Vec<char> = affix.chars().collect();
    let mut variations = HashSet::new();

    for mask in 0u32..(1u32 << letters.len()) {
        let mut variant = String::new();
        for (index, letter) in letters.iter().enumerate() {
            variant.push(*letter);
            if mask & (1 << index) != 0 {
                variant.push('.');
            }
        }
        variations.insert(variant);
    }

    variations
}

/// Extracts a lowercase (first, last) name pair from a raw display name.
///
/// Anything after the first comma is discarded, affix tokens are filtered
/// out, and the pair is picked from the surviving tokens:
/// - fewer than 2 tokens: extraction fails, both outputs empty
/// - exactly 3 tokens: first and third (the middle token is a middle name)
/// - otherwise: first and second
pub fn extract_name(name_text: &str) -> (String, String) {
    let before_comma = name_text.split(',').next().unwrap_or("");

    let filtered: Vec<String> = before_comma
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|token| !ALL_AFFIX_VARIANTS.contains(token))
        .collect();

    match filtered.len() {
        0 | 1 => (String::new(), String::new()),
        3 => (filtered[0].clone(), filtered[2].clone()),
        _ => (filtered[0].clone(), filtered[1].clone()),
    }
}

/// Capitalizes each whitespace-separated token of a name.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(token: &str) -> String {
    let lowered = token.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affix_variations() {
        let expected: HashSet<String> = ["dr", "dr.", "d.r", "d.r."]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(affix_variations("dr"), expected);
    }

    #[test]
    fn test_affix_variations_larger() {
        let expected: HashSet<String> = [
            "phd", "phd.", "ph.d", "ph.d.", "p.hd", "p.hd.", "p.h.d", "p.h.d.",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(affix_variations("phd"), expected);
    }

    #[test]
    fn test_remove_prefix() {
        assert_eq!(
            extract_name("Dr. Jeremy Long"),
            ("jeremy".to_string(), "long".to_string())
        );
    }

    #[test]
    fn test_middle_token_dropped() {
        assert_eq!(
            extract_name("jacob j more"),
            ("jacob".to_string(), "more".to_string())
        );
    }

    #[test]
    fn test_insufficient_tokens() {
        assert_eq!(extract_name("jacob phd"), (String::new(), String::new()));
    }

    #[test]
    fn test_missed_suffix_falls_back_to_first_two() {
        assert_eq!(
            extract_name("jacob more ijh jkl"),
            ("jacob".to_string(), "more".to_string())
        );
    }

    #[test]
    fn test_comma_clause_discarded() {
        assert_eq!(
            extract_name("mr. daniel r. abbatiello, pcc, rev."),
            ("daniel".to_string(), "abbatiello".to_string())
        );
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("rick sanches"), "Rick Sanches");
        assert_eq!(normalize_name("  JEREMY   long "), "Jeremy Long");
        assert_eq!(normalize_name(""), "");
    }
}
