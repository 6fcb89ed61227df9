//! Domain Classifier
//!
//! Scores every registry definition against two independent evidence
//! sources, the address text and the document's structural indicators, and
//! returns the single best candidate.
//!
//! Priority dominates confidence when ranking candidates, so a narrow
//! definition (a fashion retailer) deliberately outranks a broad one (generic
//! e-commerce) even at lower confidence.

pub mod registry;

use std::cmp::Reverse;

use serde::Serialize;

use crate::dom::Document;

pub use registry::{ContentType, ContentTypeDefinition, Registry, StructureDefinition};
use registry::STRUCTURE_PRIORITY;

/// Points for an address keyword hit. Multiple hits do not stack.
pub const KEYWORD_SCORE: u8 = 30;

/// Points per matching structural indicator.
pub const INDICATOR_SCORE: u8 = 15;

/// Cap on the indicator contribution.
pub const INDICATOR_CAP: u8 = 60;

/// Identifier reported when nothing scores.
pub const FALLBACK_DEFINITION: &str = "fallback";

/// Confidence reported when nothing scores.
pub const FALLBACK_CONFIDENCE: u8 = 50;

/// Outcome of one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub content_type: ContentType,
    /// 0 to 100.
    pub confidence: u8,
    /// Name of the registry definition that won, or `"fallback"`.
    pub matched_definition: String,
}

impl ClassificationResult {
    /// The result used when no definition scores above zero.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            content_type: ContentType::GeneralContent,
            confidence: FALLBACK_CONFIDENCE,
            matched_definition: FALLBACK_DEFINITION.to_string(),
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.matched_definition == FALLBACK_DEFINITION
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'r> {
    content_type: ContentType,
    confidence: u8,
    priority: u8,
    name: &'r str,
}

/// Classify against the built-in registry.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::classify::{self, ContentType};
///
/// let result = classify::classify("https://www.amazon.com/s?k=laptop", None);
/// assert_eq!(result.content_type, ContentType::EcommerceProducts);
/// assert_eq!(result.confidence, 30);
/// assert_eq!(result.matched_definition, "ecommerce_major");
/// ```
#[must_use]
pub fn classify(address: &str, doc: Option<&Document>) -> ClassificationResult {
    classify_with_registry(Registry::builtin(), address, doc)
}

/// Classify against a caller-supplied registry.
///
/// Deterministic: the same registry, address and document always produce
/// the same result.
#[must_use]
pub fn classify_with_registry(registry: &Registry, address: &str, doc: Option<&Document>) -> ClassificationResult {
    let address = address.to_lowercase();
    let mut candidates: Vec<Candidate> = Vec::new();

    for def in registry.domains() {
        let confidence = score_domain(def, &address, doc);
        if confidence > 0 {
            candidates.push(Candidate {
                content_type: def.content_type,
                confidence,
                priority: def.priority,
                name: &def.name,
            });
        }
    }

    if let Some(doc) = doc {
        for def in registry.structures() {
            if let Some(confidence) = score_structure(def, doc) {
                candidates.push(Candidate {
                    content_type: def.content_type,
                    confidence,
                    priority: STRUCTURE_PRIORITY,
                    name: &def.name,
                });
            }
        }
    }

    // Stable: registration order settles full ties.
    candidates.sort_by_key(|c| Reverse((c.priority, c.confidence)));

    let result = candidates
        .first()
        .map_or_else(ClassificationResult::fallback, |best| ClassificationResult {
            content_type: best.content_type,
            confidence: best.confidence,
            matched_definition: best.name.to_string(),
        });

    tracing::debug!(
        candidates = candidates.len(),
        content_type = %result.content_type,
        confidence = result.confidence,
        matched = %result.matched_definition,
        "classified"
    );

    result
}

/// Score one domain definition. `address` must already be lowercase.
#[must_use]
pub fn score_domain(def: &ContentTypeDefinition, address: &str, doc: Option<&Document>) -> u8 {
    let mut score: u16 = 0;

    if def.keywords.iter().any(|kw| address.contains(kw.as_str())) {
        score += u16::from(KEYWORD_SCORE);
    }

    if let Some(doc) = doc {
        let matched = def
            .indicators
            .iter()
            .filter(|css| doc.try_select(css).is_some())
            .count();
        let indicator_score = u16::try_from(matched)
            .unwrap_or(u16::MAX)
            .saturating_mul(u16::from(INDICATOR_SCORE))
            .min(u16::from(INDICATOR_CAP));
        score += indicator_score;
    }

    u8::try_from(score.min(100)).unwrap_or(100)
}

/// Score one structure definition; `None` below its minimum count.
#[must_use]
pub fn score_structure(def: &StructureDefinition, doc: &Document) -> Option<u8> {
    let count: usize = def
        .indicators
        .iter()
        .map(|css| doc.try_select(css).map_or(0, |sel| sel.length()))
        .sum();

    if count < def.min_count {
        return None;
    }

    let confidence = count.saturating_mul(5).saturating_add(50).min(90);
    Some(u8::try_from(confidence).unwrap_or(90))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str) -> Document {
        Document::parse("https://example.org/page", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    fn synthetic(name: &str, ct: ContentType, priority: u8) -> ContentTypeDefinition {
        ContentTypeDefinition::new(name, ct, &["widgetshop"], &[]).with_priority(priority)
    }

    #[test]
    fn test_keyword_hits_do_not_stack() {
        let def = ContentTypeDefinition::new("d", ContentType::NewsArticles, &["alpha", "beta"], &[]);
        assert_eq!(score_domain(&def, "https://alpha-beta.test/", None), 30);
        assert_eq!(score_domain(&def, "https://gamma.test/", None), 0);
    }

    #[test]
    fn test_indicator_score_capped() {
        let def = ContentTypeDefinition::new(
            "d",
            ContentType::NewsArticles,
            &[],
            &["p", "div", "span", "ul", "li", "a"],
        );
        let d = doc("<div><p>x</p><span>y</span><ul><li><a href='/'>z</a></li></ul></div>");
        assert_eq!(score_domain(&def, "", Some(&d)), 60);
    }

    #[test]
    fn test_invalid_indicator_counts_as_no_match() {
        let def = ContentTypeDefinition::new("d", ContentType::NewsArticles, &[], &["div[[", "p"]);
        let d = doc("<div><p>x</p></div>");
        assert_eq!(score_domain(&def, "", Some(&d)), 15);
    }

    #[test]
    fn test_structure_confidence_formula() {
        let def = StructureDefinition::new("t", ContentType::TabularData, &["td"], 2);
        let two = doc("<table><tr><td>1</td><td>2</td></tr></table>");
        let one = doc("<table><tr><td>1</td></tr></table>");
        let many = doc(&format!("<table><tr>{}</tr></table>", "<td>x</td>".repeat(20)));

        assert_eq!(score_structure(&def, &two), Some(60));
        assert_eq!(score_structure(&def, &one), None);
        assert_eq!(score_structure(&def, &many), Some(90));
    }

    #[test]
    fn test_priority_beats_confidence() {
        let low = ContentTypeDefinition::new("broad", ContentType::EcommerceProducts, &["widgetshop"], &["p"])
            .with_priority(3);
        let high = synthetic("narrow", ContentType::FashionProducts, 9);
        let registry = Registry::new(vec![low, high], Vec::new());

        let result = classify_with_registry(&registry, "https://widgetshop.test/", Some(&doc("<p>x</p>")));
        assert_eq!(result.matched_definition, "narrow");
        assert_eq!(result.confidence, 30);
    }

    #[test]
    fn test_full_tie_keeps_registration_order() {
        let registry = Registry::new(
            vec![
                synthetic("first", ContentType::NewsArticles, 5),
                synthetic("second", ContentType::TechNews, 5),
            ],
            Vec::new(),
        );
        let result = classify_with_registry(&registry, "https://widgetshop.test/", None);
        assert_eq!(result.matched_definition, "first");
    }

    #[test]
    fn test_empty_registry_falls_back() {
        let result = classify_with_registry(&Registry::default(), "https://example.org/", None);
        assert_eq!(result, ClassificationResult::fallback());
        assert!(result.is_fallback());
    }
}
