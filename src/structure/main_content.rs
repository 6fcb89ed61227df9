//! Main content heuristic.

use std::cmp::Reverse;

use dom_query::Selection;
use serde::Serialize;

use crate::dom::{self, Document};
use crate::patterns::MAIN_CONTENT_NAME;
use crate::selector::utils;

/// Where a main-content candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    /// A `main` or `article` element.
    Semantic,
    /// Matched on a class token.
    Class,
    /// Matched on the id.
    Id,
}

/// A main-content candidate borrowed from the document.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub element: Selection<'a>,
    pub origin: CandidateOrigin,
    pub text_length: usize,
}

impl Candidate<'_> {
    #[must_use]
    pub fn summary(&self) -> MainContentSummary {
        MainContentSummary {
            tag: dom::tag_name(&self.element).unwrap_or_default(),
            classes: dom::class_tokens(&self.element),
            id: dom::id(&self.element),
            child_count: self.element.children().length(),
            origin: self.origin,
            text_length: self.text_length,
        }
    }
}

/// Owned description of the chosen main-content element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainContentSummary {
    pub tag: String,
    pub classes: Vec<String>,
    pub id: String,
    /// Direct element children.
    pub child_count: usize,
    pub origin: CandidateOrigin,
    pub text_length: usize,
}

/// Gather main-content candidates in discovery order.
///
/// Semantic elements always qualify. Class/id matches qualify when their text
/// is longer than `min_text`; a `min_text` of zero disables the filter.
#[must_use]
pub fn candidates(doc: &Document, min_text: usize) -> Vec<Candidate<'_>> {
    let mut found = Vec::new();

    for tag in ["main", "article"] {
        for element in dom::elements_of(&doc.select(tag)) {
            let text_length = dom::text_len(&element);
            found.push(Candidate {
                element,
                origin: CandidateOrigin::Semantic,
                text_length,
            });
        }
    }

    for element in doc.elements() {
        let origin = if utils::class_matches(&element, &MAIN_CONTENT_NAME) {
            CandidateOrigin::Class
        } else if utils::id_matches(&element, &MAIN_CONTENT_NAME) {
            CandidateOrigin::Id
        } else {
            continue;
        };

        let text_length = dom::text_len(&element);
        if min_text == 0 || text_length > min_text {
            found.push(Candidate {
                element,
                origin,
                text_length,
            });
        }
    }

    found
}

/// Best main-content candidate.
///
/// Semantic candidates outrank class/id ones; within an origin group the
/// longest text wins and remaining ties keep discovery order.
#[must_use]
pub fn find(doc: &Document, min_text: usize) -> Option<Candidate<'_>> {
    let mut found = candidates(doc, min_text);
    found.sort_by_key(|c| (Reverse(c.origin == CandidateOrigin::Semantic), Reverse(c.text_length)));
    found.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str) -> Document {
        Document::parse("https://example.org/", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    fn filler(n: usize) -> String {
        "word ".repeat(n)
    }

    #[test]
    fn test_semantic_outranks_longer_class_match() {
        let markup = format!(
            "<div class='content'>{}</div><article>short</article>",
            filler(200)
        );
        let d = doc(&markup);
        let best = find(&d, 500).map(|c| c.summary());

        assert_eq!(best.as_ref().map(|s| s.tag.as_str()), Some("article"));
        assert_eq!(best.map(|s| s.origin), Some(CandidateOrigin::Semantic));
    }

    #[test]
    fn test_longest_semantic_wins() {
        let d = doc("<article>one</article><main>a much longer main element</main>");
        let best = find(&d, 500).map(|c| c.summary());
        assert_eq!(best.map(|s| s.tag), Some("main".to_string()));
    }

    #[test]
    fn test_equal_length_keeps_first_seen() {
        let d = doc("<article id='a'>same</article><article id='b'>same</article>");
        let best = find(&d, 500).map(|c| c.summary());
        assert_eq!(best.map(|s| s.id), Some("a".to_string()));
    }

    #[test]
    fn test_class_candidates_need_threshold() {
        let d = doc("<div class='page-wrapper'>tiny</div>");

        assert!(find(&d, 500).is_none());

        let basic = find(&d, 0).map(|c| c.summary());
        assert_eq!(basic.as_ref().map(|s| s.origin), Some(CandidateOrigin::Class));
        assert_eq!(basic.map(|s| s.classes), Some(vec!["page-wrapper".to_string()]));
    }

    #[test]
    fn test_id_match() {
        let markup = format!("<section id='MainBody'><p>{}</p><p>x</p></section>", filler(150));
        let d = doc(&markup);
        let best = find(&d, 500).map(|c| c.summary());

        assert_eq!(best.as_ref().map(|s| s.origin), Some(CandidateOrigin::Id));
        assert_eq!(best.map(|s| s.child_count), Some(2));
    }
}
