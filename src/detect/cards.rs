//! Card/tile cluster detection.

use serde::Serialize;

use crate::dom::{self, Document};
use crate::selector::utils;
use crate::Options;

const CARD_KEYWORDS: [&str; 5] = ["card", "tile", "box", "item", "panel"];

/// Elements whose classes contain one card keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardPattern {
    pub keyword: String,
    pub count: usize,
    /// Class tokens of the first match.
    pub classes: Vec<String>,
    pub has_image: bool,
    pub has_heading: bool,
    pub has_link: bool,
    pub has_button: bool,
}

/// One pattern per qualifying keyword, most matches first.
#[must_use]
pub fn card_patterns(doc: &Document, options: &Options) -> Vec<CardPattern> {
    let elements: Vec<_> = doc
        .elements()
        .into_iter()
        .map(|el| {
            let tokens = dom::class_tokens(&el);
            (el, tokens)
        })
        .filter(|(_, tokens)| !tokens.is_empty())
        .collect();

    let mut patterns: Vec<CardPattern> = CARD_KEYWORDS
        .iter()
        .filter_map(|keyword| {
            let matches: Vec<_> = elements
                .iter()
                .filter(|(_, tokens)| utils::tokens_contain(tokens, keyword))
                .collect();
            if matches.len() < options.card_min_matches {
                return None;
            }

            let (sample, sample_tokens) = matches.first()?;
            Some(CardPattern {
                keyword: (*keyword).to_string(),
                count: matches.len(),
                classes: sample_tokens.clone(),
                has_image: dom::has_descendant(sample, "img"),
                has_heading: dom::has_descendant(sample, "h1, h2, h3, h4, h5, h6"),
                has_link: dom::has_descendant(sample, "a"),
                has_button: dom::has_descendant(sample, "button"),
            })
        })
        .collect();

    patterns.sort_by(|a, b| b.count.cmp(&a.count));
    patterns.truncate(options.max_card_patterns);
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str) -> Document {
        Document::parse("https://example.org/", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_keyword_needs_three_matches() {
        let d = doc("<div class='card'>a</div><div class='card'>b</div>");
        assert!(card_patterns(&d, &Options::default()).is_empty());
    }

    #[test]
    fn test_card_structure_flags() {
        let card = "<div class='ProductCard'><img src='a.png'><h3>T</h3><button>Buy</button></div>";
        let d = doc(&card.repeat(3));
        let patterns = card_patterns(&d, &Options::default());

        assert_eq!(patterns.len(), 1);
        let p = &patterns[0];
        assert_eq!(p.keyword, "card");
        assert_eq!(p.count, 3);
        assert_eq!(p.classes, vec!["ProductCard"]);
        assert!(p.has_image && p.has_heading && p.has_button);
        assert!(!p.has_link);
    }

    #[test]
    fn test_ranked_by_count() {
        let tiles = "<span class='tile'>t</span>".repeat(3);
        let boxes = "<span class='box'>b</span>".repeat(4);
        let patterns = card_patterns(&doc(&format!("{tiles}{boxes}")), &Options::default());

        let keywords: Vec<&str> = patterns.iter().map(|p| p.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["box", "tile"]);
    }

    #[test]
    fn test_card_patterns_capped_at_five() {
        let markup: String = ["card", "tile", "box", "item", "panel"]
            .iter()
            .map(|kw| format!("<i class='{kw}'></i>").repeat(3))
            .collect();
        let patterns = card_patterns(&doc(&format!("{markup}<i class='cardtilebox'></i>")), &Options::default());
        assert_eq!(patterns.len(), 5);
    }
}
