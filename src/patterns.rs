//! Compiled regex patterns for class matching and text cleanup.
//!
//! All patterns are compiled once at startup using `LazyLock`.
//! Patterns are organized by the stage that consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Listing / Card Patterns
// =============================================================================

/// Class names of product, item, or card containers.
pub static LISTING_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)product|item|card").expect("LISTING_CLASS regex"));

/// Card-like class names counted as a listing signal. Case-sensitive, unlike
/// [`LISTING_CLASS`].
pub static CARD_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"card|item|product").expect("CARD_CLASS regex"));

/// Class names of title-bearing headings inside a listing.
pub static TITLE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title|name|heading").expect("TITLE_CLASS regex"));

/// Class names of price elements.
pub static PRICE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)price|cost|amount").expect("PRICE_CLASS regex"));

/// Class names of short descriptions.
pub static DESCRIPTION_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)description|summary|excerpt").expect("DESCRIPTION_CLASS regex")
});

// =============================================================================
// Article Patterns
// =============================================================================

/// Class names of article-like containers when no `<article>` exists.
pub static ARTICLE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)post|entry|article").expect("ARTICLE_CLASS regex"));

/// Class names of date elements.
pub static DATE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)date|time|published").expect("DATE_CLASS regex"));

/// Class names of author elements.
pub static AUTHOR_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)author|by|writer").expect("AUTHOR_CLASS regex"));

/// Class names of content previews.
pub static PREVIEW_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)content|excerpt|summary").expect("PREVIEW_CLASS regex"));

// =============================================================================
// Fixture Patterns
// =============================================================================

/// Class names of generic fixture containers.
pub static MATCH_ITEM_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)match-item|matchItem|fixture").expect("MATCH_ITEM_CLASS regex")
});

/// Hrefs pointing at a match detail page.
pub static MATCH_DETAIL_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/match/\d+/").expect("MATCH_DETAIL_HREF regex"));

/// Class names of kick-off time elements.
pub static TIME_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)time|hour|clock").expect("TIME_CLASS regex"));

/// Class names of team elements.
pub static TEAM_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)team").expect("TEAM_CLASS regex"));

/// Class names of calendar/date navigation strips.
pub static CALENDAR_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)calendar|date-nav").expect("CALENDAR_CLASS regex"));

/// Embedded `--12:30` style time tokens in team names.
pub static EMBEDDED_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"---?\d+:\d+").expect("EMBEDDED_TIME regex"));

/// Embedded `2 - 1` style score tokens in team names.
pub static EMBEDDED_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s*-\s*\d+").expect("EMBEDDED_SCORE regex"));

// =============================================================================
// Structure Patterns
// =============================================================================

/// Class/id keywords of main-content containers.
pub static MAIN_CONTENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)content|main|body|article|post|entry|container|wrapper|page-content")
        .expect("MAIN_CONTENT_NAME regex")
});

/// Iframe sources of embedded video players.
pub static EMBEDDED_VIDEO_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtube|vimeo").expect("EMBEDDED_VIDEO_SRC regex"));

/// Class names of infinite-scroll containers.
pub static INFINITE_SCROLL_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)infinite|scroll|lazy-load").expect("INFINITE_SCROLL_CLASS regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_class_is_case_insensitive() {
        assert!(LISTING_CLASS.is_match("Product-Card"));
        assert!(LISTING_CLASS.is_match("grid-item"));
        assert!(!LISTING_CLASS.is_match("sidebar"));
    }

    #[test]
    fn test_card_class_is_case_sensitive() {
        assert!(CARD_CLASS.is_match("grid-item"));
        assert!(!CARD_CLASS.is_match("ProductTile"));
    }

    #[test]
    fn test_match_detail_href() {
        assert!(MATCH_DETAIL_HREF.is_match("/match/12345/al-ahly-vs-zamalek"));
        assert!(!MATCH_DETAIL_HREF.is_match("/matches/today"));
    }

    #[test]
    fn test_embedded_tokens() {
        assert_eq!(EMBEDDED_TIME.replace_all("Ahly--20:00", "").trim(), "Ahly");
        assert_eq!(EMBEDDED_SCORE.replace_all("Zamalek 2 - 1", "").trim(), "Zamalek");
    }
}
