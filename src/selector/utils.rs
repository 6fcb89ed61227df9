//! Token predicates for class/id matching.
//!
//! All matching over class and id values goes through these functions. They
//! take the normalized token list so callers can reuse one split per element.

use dom_query::Selection;
use regex::Regex;

use crate::dom;

/// Whether any token contains `keyword`, ignoring ASCII case.
#[must_use]
pub fn tokens_contain(tokens: &[String], keyword: &str) -> bool {
    let keyword = keyword.to_ascii_lowercase();
    tokens
        .iter()
        .any(|token| token.to_ascii_lowercase().contains(&keyword))
}

/// Whether any token contains any of the keywords.
#[must_use]
pub fn tokens_contain_any(tokens: &[String], keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| tokens_contain(tokens, kw))
}

/// Whether any token is exactly `name`.
#[must_use]
pub fn tokens_include(tokens: &[String], name: &str) -> bool {
    tokens.iter().any(|token| token == name)
}

/// Whether `pattern` matches any token.
#[must_use]
pub fn tokens_match(tokens: &[String], pattern: &Regex) -> bool {
    tokens.iter().any(|token| pattern.is_match(token))
}

/// Order-normalized class signature: sorted, deduplicated, space-joined.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::selector::utils::class_signature;
///
/// let tokens = vec!["b".to_string(), "a".to_string(), "b".to_string()];
/// assert_eq!(class_signature(&tokens), "a b");
/// ```
#[must_use]
pub fn class_signature(tokens: &[String]) -> String {
    let mut sorted: Vec<&str> = tokens.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.join(" ")
}

/// Whether the element's class tokens contain `keyword`.
#[must_use]
pub fn has_class_keyword(sel: &Selection, keyword: &str) -> bool {
    tokens_contain(&dom::class_tokens(sel), keyword)
}

/// Whether the element's class tokens match `pattern`.
#[must_use]
pub fn class_matches(sel: &Selection, pattern: &Regex) -> bool {
    tokens_match(&dom::class_tokens(sel), pattern)
}

/// Whether the element's id matches `pattern`.
#[must_use]
pub fn id_matches(sel: &Selection, pattern: &Regex) -> bool {
    let id = dom::id(sel);
    !id.is_empty() && pattern.is_match(&id)
}

/// Whether the element has exactly the class `name`.
#[must_use]
pub fn has_class(sel: &Selection, name: &str) -> bool {
    tokens_include(&dom::class_tokens(sel), name)
}
