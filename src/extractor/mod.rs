//! Adaptive Extractor
//!
//! A closed family of extraction routines, each turning the elements of a
//! document into flat [`ExtractedRecord`]s. A strategy names the routines to
//! try in order; the first one producing records wins, and the generic
//! routine runs when none does.
//!
//! # Module Structure
//!
//! - `record`: the record model and tabular export helpers
//! - `tables`: one record per table row
//! - `listing`: product/card listings
//! - `articles`: blog and news listings
//! - `lists`: one record per list item
//! - `fixtures`: sports fixtures with deduplication
//! - `generic`: single-record page summary, never empty
//!
//! Routines never fail. A container that yields nothing useful is skipped
//! with a debug note and extraction carries on.

pub mod articles;
pub mod fixtures;
pub mod generic;
pub mod listing;
pub mod lists;
pub mod record;
pub mod tables;

use std::collections::{HashMap, HashSet};

use dom_query::{NodeId, Selection};
use serde::Serialize;

use crate::dom::{self, Document};
use crate::selector::{utils, Rule};
use crate::strategy::{ElementSelector, ExtractionStrategy};
use crate::Options;

pub use record::{column_union, ExtractedRecord, FieldValue, Link};

/// Named extraction routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Routine {
    TableFocused,
    ListingCards,
    ArticleListing,
    ListBased,
    FixtureMatches,
    Generic,
}

impl Routine {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TableFocused => "table_focused",
            Self::ListingCards => "listing_cards",
            Self::ArticleListing => "article_listing",
            Self::ListBased => "list_based",
            Self::FixtureMatches => "fixture_matches",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Routine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run one routine.
///
/// `scope` holds the elements matched by the strategy's selector; `None`
/// searches the whole document. The generic routine ignores the scope.
#[must_use]
pub fn run<'a>(
    routine: Routine,
    doc: &'a Document,
    scope: Option<&Selection<'a>>,
    options: &Options,
) -> Vec<ExtractedRecord> {
    match routine {
        Routine::TableFocused => tables::extract(doc, scope),
        Routine::ListingCards => listing::extract(doc, scope, options),
        Routine::ArticleListing => articles::extract(doc, scope, options),
        Routine::ListBased => lists::extract(doc, scope),
        Routine::FixtureMatches => fixtures::extract(doc, scope, options),
        Routine::Generic => vec![generic::extract(doc, options)],
    }
}

/// Records produced for one document, and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<ExtractedRecord>,
    /// The routine whose records were kept.
    pub routine: Routine,
    /// Selector that scoped the routine, if one matched.
    pub selector: Option<ElementSelector>,
    /// True when every strategy routine came back empty.
    pub fallback: bool,
}

/// Extract with a strategy, falling back to the generic routine.
///
/// The result is never empty.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::classify::ClassificationResult;
/// use rs_adaptive_extract::dom::Document;
/// use rs_adaptive_extract::{extractor, strategy, Options};
///
/// let doc = Document::parse("https://example.org/", "<p>Nothing repeating here.</p>")?;
/// let plan = strategy::select(&ClassificationResult::fallback());
/// let extraction = extractor::extract_with_strategy(&doc, &plan, &Options::default());
/// assert_eq!(extraction.records.len(), 1);
/// # Ok::<(), rs_adaptive_extract::Error>(())
/// ```
#[must_use]
pub fn extract_with_strategy(doc: &Document, strategy: &ExtractionStrategy, options: &Options) -> Extraction {
    let scope = strategy.scope(doc);
    let selector = scope.as_ref().map(|(selector, _)| (*selector).clone());
    let matches = scope.as_ref().map(|(_, matches)| matches);

    for &routine in &strategy.routines {
        let records = run(routine, doc, matches, options);
        tracing::debug!(routine = %routine, records = records.len(), "routine finished");
        if !records.is_empty() {
            return Extraction {
                records,
                routine,
                selector,
                fallback: false,
            };
        }
    }

    tracing::warn!(
        address = %doc.address(),
        routines = ?strategy.routines,
        "no routine produced records, using generic fallback"
    );

    Extraction {
        records: vec![generic::extract(doc, options)],
        routine: Routine::Generic,
        selector,
        fallback: true,
    }
}

// === Scope Helpers ===

/// Elements matching `css` at or below the scope, or in the whole document.
///
/// Each element appears once, in scope order.
pub(crate) fn scoped<'a>(doc: &'a Document, scope: Option<&Selection<'a>>, css: &str) -> Vec<Selection<'a>> {
    let Some(scope) = scope else {
        return dom::elements_of(&doc.select(css));
    };

    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut out = Vec::new();
    for node in scope.nodes() {
        let root = Selection::from(*node);
        if root.is(css) && seen.insert(node.id) {
            out.push(root.clone());
        }
        for inner in root.select(css).nodes() {
            if seen.insert(inner.id) {
                out.push(Selection::from(*inner));
            }
        }
    }
    out
}

/// Tags a repeated item can have. Repeated inline parts (badges, links)
/// never make their container a wrapper.
const ITEM_TAGS: [&str; 4] = ["div", "li", "article", "section"];

/// Scope elements together with every element below them that satisfies
/// `rule`, each once, in scope order.
pub(crate) fn scoped_items<'a>(scope: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut out = Vec::new();
    for node in scope.nodes() {
        let root = Selection::from(*node);
        if seen.insert(node.id) {
            out.push(root.clone());
        }
        for inner in root.select("*").nodes() {
            let el = Selection::from(*inner);
            if rule(&el) && seen.insert(inner.id) {
                out.push(el);
            }
        }
    }
    out
}

/// Reduces candidate containers to the repeated items.
///
/// A wrapper holds two or more block-level candidates with the same tag and
/// class signature; wrappers are dropped. Of the rest, candidates nested inside
/// another remaining candidate are parts of an item and are dropped too.
pub(crate) fn repeated_items<'a>(found: Vec<Selection<'a>>) -> Vec<Selection<'a>> {
    let ids: HashSet<NodeId> = found.iter().filter_map(|el| el.nodes().first().map(|n| n.id)).collect();
    let mut nested: HashMap<(NodeId, String), usize> = HashMap::new();

    for el in &found {
        let Some(node) = el.nodes().first() else {
            continue;
        };
        let Some(tag) = dom::tag_name(el).filter(|tag| ITEM_TAGS.contains(&tag.as_str())) else {
            continue;
        };
        let signature = format!("{tag}.{}", utils::class_signature(&dom::class_tokens(el)));
        let mut current = node.parent();
        while let Some(parent) = current {
            if ids.contains(&parent.id) {
                *nested.entry((parent.id, signature.clone())).or_default() += 1;
            }
            current = parent.parent();
        }
    }

    let wrappers: HashSet<NodeId> = nested
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((id, _), _)| id)
        .collect();
    let items: HashSet<NodeId> = ids.difference(&wrappers).copied().collect();
    tracing::debug!(
        candidates = found.len(),
        wrappers = wrappers.len(),
        "repeated item containers"
    );

    found
        .into_iter()
        .filter(|el| {
            el.nodes().first().is_some_and(|node| {
                if wrappers.contains(&node.id) {
                    return false;
                }
                let mut current = node.parent();
                while let Some(parent) = current {
                    if items.contains(&parent.id) {
                        return false;
                    }
                    current = parent.parent();
                }
                true
            })
        })
        .collect()
}

/// Trimmed text of the first element matching `css` below `sel`.
pub(crate) fn first_text(sel: &Selection, css: &str) -> Option<String> {
    sel.select(css)
        .nodes()
        .first()
        .map(|node| dom::clean_text(&Selection::from(*node)))
        .filter(|text| !text.is_empty())
}

/// Resolved href of the first link below `sel`.
pub(crate) fn first_link(doc: &Document, sel: &Selection) -> Option<String> {
    sel.select("a[href]")
        .nodes()
        .iter()
        .find_map(|node| Selection::from(*node).attr("href").map(|href| href.to_string()))
        .map(|href| doc.resolve(&href))
}
