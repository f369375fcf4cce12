//! Step text analysis
//!
//! Derives the step-definition function name from a step sentence and
//! extracts its call arguments. The derivation is deterministic: quoted
//! literals are stripped first (they become arguments, not identifier
//! material), so sentences differing only in quoted content map to the same
//! function.

use regex::Regex;

/// Identifiers containing one of these fragments operate on the shared
/// browser page and receive it as their first argument.
const PAGE_KEYWORDS: &[&str] = &[
    "navigate",
    "click",
    "see",
    "fill",
    "type",
    "press",
    "waitfor",
    "wait",
    "locator",
    "select",
    "title",
    "url",
    "element",
    "shouldsee",
    "shouldnotsee",
];

/// Base-URL setters match the keyword list ("url") but never touch the page.
const PAGE_EXCLUSIONS: &[&str] = &["thebaseurlis", "thebaseurl"];

fn quoted_literal_pattern() -> Regex {
    Regex::new(r#""([^"]*)"|'([^']*)'"#).unwrap()
}

/// Derive the camelCase step-definition identifier from a step sentence.
///
/// Quoted substrings are removed, remaining non-alphanumeric characters are
/// dropped, and the words are joined camelCase. Stable and idempotent: the
/// same sentence always yields the same identifier.
pub fn derive_identifier(text: &str) -> String {
    let without_quotes = quoted_literal_pattern().replace_all(text, "");

    let cleaned: String = without_quotes
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_ascii_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Extract the quoted literals of a step sentence in left-to-right order.
/// Both double- and single-quoted literals are recognized; the quotes
/// themselves are not part of the extracted value.
pub fn extract_arguments(text: &str) -> Vec<String> {
    quoted_literal_pattern()
        .captures_iter(text)
        .map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Keyword classifier for calls that require the shared page handle.
pub fn needs_page_handle(identifier: &str) -> bool {
    let lower = identifier.to_ascii_lowercase();

    if PAGE_EXCLUSIONS.iter().any(|kw| lower.contains(kw)) {
        return false;
    }

    PAGE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_is_camel_case() {
        assert_eq!(
            derive_identifier("I make a GET request to the users endpoint"),
            "iMakeAGetRequestToTheUsersEndpoint"
        );
    }

    #[test]
    fn test_quoted_content_does_not_affect_identifier() {
        let a = derive_identifier(r#"I make a GET request to "/users/1""#);
        let b = derive_identifier(r#"I make a GET request to "/posts/2""#);
        assert_eq!(a, b);
        assert_eq!(a, "iMakeAGetRequestTo");
    }

    #[test]
    fn test_identifier_is_deterministic_and_idempotent() {
        let text = r#"the response status should be "200""#;
        assert_eq!(derive_identifier(text), derive_identifier(text));
        assert_eq!(derive_identifier(text), "theResponseStatusShouldBe");
    }

    #[test]
    fn test_punctuation_is_stripped() {
        assert_eq!(
            derive_identifier("the user's cart is empty!"),
            "theUsersCartIsEmpty"
        );
    }

    #[test]
    fn test_all_quoted_text_degrades_to_empty_identifier() {
        assert_eq!(derive_identifier(r#""only" 'quotes'"#), "");
    }

    #[test]
    fn test_arguments_preserve_sentence_order() {
        let args = extract_arguments(r#"I fill "A" and "B""#);
        assert_eq!(args, vec!["A", "B"]);
    }

    #[test]
    fn test_arguments_mix_quote_styles() {
        let args = extract_arguments(r#"I store "token" in 'auth.json'"#);
        assert_eq!(args, vec!["token", "auth.json"]);
    }

    #[test]
    fn test_no_quotes_means_no_arguments() {
        assert!(extract_arguments("I clear the auth token").is_empty());
    }

    #[test]
    fn test_page_handle_classification() {
        assert!(needs_page_handle("iNavigateTo"));
        assert!(needs_page_handle("iClickTheButton"));
        assert!(needs_page_handle("iWaitForTheElement"));
        assert!(needs_page_handle("thePageTitleShouldBe"));
        assert!(!needs_page_handle("iMakeAGetRequestTo"));
    }

    #[test]
    fn test_base_url_setter_is_excluded() {
        // contains "url" but must never receive the page handle
        assert!(!needs_page_handle("theBaseUrlIs"));
    }
}
