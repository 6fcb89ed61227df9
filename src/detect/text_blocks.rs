//! Long free-text block detection.

use serde::Serialize;

use crate::dom::{self, Document};
use crate::Options;

const TEXT_BLOCK_TAGS: [&str; 5] = ["p", "div", "span", "article", "section"];
const PREVIEW_LIMIT: usize = 200;

/// An element holding a long run of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    pub tag: String,
    pub classes: Vec<String>,
    pub id: String,
    pub text_length: usize,
    pub word_count: usize,
    pub has_links: bool,
    /// Contains `strong`, `em`, `b` or `i`.
    pub has_emphasis: bool,
    pub preview: String,
}

/// Blocks longer than `text_block_min_len`, longest first.
///
/// Tags are scanned in a fixed order, so among equally long blocks a `p`
/// precedes a `div`, and so on.
#[must_use]
pub fn text_blocks(doc: &Document, options: &Options) -> Vec<TextBlock> {
    let mut blocks = Vec::new();

    for tag in TEXT_BLOCK_TAGS {
        for element in dom::elements_of(&doc.select(tag)) {
            let text = dom::clean_text(&element);
            let text_length = text.chars().count();
            if text_length <= options.text_block_min_len {
                continue;
            }

            blocks.push(TextBlock {
                tag: tag.to_string(),
                classes: dom::class_tokens(&element),
                id: dom::id(&element),
                text_length,
                word_count: text.split_whitespace().count(),
                has_links: dom::has_descendant(&element, "a"),
                has_emphasis: dom::has_descendant(&element, "strong, em, b, i"),
                preview: dom::truncate_chars(&text, PREVIEW_LIMIT),
            });
        }
    }

    blocks.sort_by(|a, b| b.text_length.cmp(&a.text_length));
    blocks.truncate(options.max_text_blocks);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str) -> Document {
        Document::parse("https://example.org/", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_short_text_is_ignored() {
        let d = doc(&format!("<p>{}</p>", "a".repeat(100)));
        assert!(text_blocks(&d, &Options::default()).is_empty());
    }

    #[test]
    fn test_block_fields_and_order() {
        let long = "lorem ipsum ".repeat(30);
        let longer = "dolor sit amet ".repeat(30);
        let d = doc(&format!(
            "<p class='intro'>{long}<em>x</em></p><section id='s'><a href='/'>{longer}</a></section>"
        ));
        let blocks = text_blocks(&d, &Options::default());

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].tag, "section");
        assert_eq!(blocks[0].id, "s");
        assert!(blocks[0].has_links);
        assert_eq!(blocks[0].word_count, 90);
        assert_eq!(blocks[0].preview.chars().count(), 200);

        assert_eq!(blocks[1].tag, "p");
        assert!(blocks[1].has_emphasis);
        assert_eq!(blocks[1].classes, vec!["intro"]);
    }

    #[test]
    fn test_blocks_capped() {
        let markup = format!("<p>{}</p>", "text ".repeat(40)).repeat(20);
        assert_eq!(text_blocks(&doc(&markup), &Options::default()).len(), 15);
    }
}
