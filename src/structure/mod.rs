//! Structural Analyzer
//!
//! One pass over the parsed tree produces a [`StructuralProfile`]: element
//! counts, depth, semantic tag usage, the heading/form/table/media/link
//! inventories, the best-guess main content element, and the coarse listing
//! signals the structural strategy path relies on.
//!
//! Analysis never fails. A document without a given feature simply reports
//! zero counts and empty inventories for it.

pub mod inventory;
pub mod main_content;
pub mod signals;
pub mod structured_data;

use std::collections::BTreeMap;

use dom_query::NodeRef;
use serde::Serialize;

use crate::dom::Document;
use crate::Options;

pub use inventory::{
    FormDetail, FormInventory, HeadingEntry, HeadingInventory, ImageStats, LinkInventory, MediaInventory,
    TableDetail, TableInventory,
};
pub use main_content::{CandidateOrigin, MainContentSummary};
pub use signals::{
    DataAttribute, DynamicSignals, ListingSignals, PageSignal, Pagination, PaginationHint, PaginationKind, SpaFramework,
};
pub use structured_data::StructuredData;

/// Semantic HTML5 tags whose usage is counted.
pub const SEMANTIC_TAGS: [&str; 7] = ["header", "nav", "main", "article", "section", "aside", "footer"];

/// Per-document structural facts. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuralProfile {
    /// Number of elements in the document, `<html>` included.
    pub total_elements: usize,

    /// Number of distinct tag names.
    pub unique_tags: usize,

    /// Occurrences per tag name.
    pub tag_distribution: BTreeMap<String, usize>,

    /// Deepest element level below `<body>` (0 for an empty body).
    pub max_depth: usize,

    /// Counts of the semantic tags present in the document.
    ///
    /// Tags that do not occur are absent from the map.
    pub semantic: BTreeMap<String, usize>,

    pub headings: HeadingInventory,
    pub forms: FormInventory,
    pub tables: TableInventory,
    pub media: MediaInventory,
    pub links: LinkInventory,

    /// Summary of the best main-content candidate, if any.
    pub main_content: Option<MainContentSummary>,

    pub signals: ListingSignals,
    pub pagination: Pagination,
    pub dynamic: DynamicSignals,

    /// Top `data-*` attributes by occurrence.
    pub data_attributes: Vec<DataAttribute>,

    pub structured_data: StructuredData,
}

impl StructuralProfile {
    /// Whether any semantic HTML5 tag is used.
    #[must_use]
    pub fn uses_semantic_html(&self) -> bool {
        !self.semantic.is_empty()
    }

    /// Count for one semantic tag, zero when absent.
    #[must_use]
    pub fn semantic_count(&self, tag: &str) -> usize {
        self.semantic.get(tag).copied().unwrap_or(0)
    }
}

/// Analyze a document with default options.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::dom::Document;
/// use rs_adaptive_extract::structure;
///
/// let doc = Document::parse(
///     "https://example.org/",
///     "<html><body><main><table><tr><td>1</td></tr></table></main></body></html>",
/// )?;
/// let profile = structure::analyze(&doc);
/// assert_eq!(profile.tables.total, 1);
/// assert_eq!(profile.semantic_count("main"), 1);
/// # Ok::<(), rs_adaptive_extract::Error>(())
/// ```
#[must_use]
pub fn analyze(doc: &Document) -> StructuralProfile {
    analyze_with_options(doc, &Options::default())
}

/// Analyze a document.
#[must_use]
pub fn analyze_with_options(doc: &Document, options: &Options) -> StructuralProfile {
    let tag_distribution = tag_distribution(doc);
    let total_elements = tag_distribution.values().sum();

    let semantic = SEMANTIC_TAGS
        .iter()
        .filter_map(|tag| {
            let count = tag_distribution.get(*tag).copied().unwrap_or(0);
            (count > 0).then(|| ((*tag).to_string(), count))
        })
        .collect();

    let main_content = main_content::find(doc, options.main_content_threshold())
        .map(|candidate| candidate.summary());

    let profile = StructuralProfile {
        total_elements,
        unique_tags: tag_distribution.len(),
        max_depth: max_depth(doc),
        semantic,
        headings: inventory::headings(doc),
        forms: inventory::forms(doc),
        tables: inventory::tables(doc),
        media: inventory::media(doc),
        links: inventory::links(doc),
        main_content,
        signals: signals::listing_signals(doc),
        pagination: signals::pagination(doc),
        dynamic: signals::dynamic_signals(doc),
        data_attributes: signals::data_attributes(doc),
        structured_data: structured_data::extract(doc),
        tag_distribution,
    };

    tracing::debug!(
        total_elements = profile.total_elements,
        max_depth = profile.max_depth,
        tables = profile.tables.total,
        links = profile.links.total,
        "structure analyzed"
    );

    profile
}

fn tag_distribution(doc: &Document) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for node in doc.select("*").nodes() {
        if let Some(name) = node.node_name() {
            *counts.entry(name.to_ascii_lowercase()).or_insert(0) += 1;
        }
    }
    counts
}

/// Maximum element depth below the body (or root when there is no body).
///
/// A direct child of the body is at depth 1. Text nodes do not count.
#[must_use]
pub fn max_depth(doc: &Document) -> usize {
    let body = doc.body();
    let Some(start) = body.nodes().first() else {
        return 0;
    };

    let mut deepest = 0;
    let mut stack: Vec<(NodeRef, usize)> = vec![(*start, 0)];
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        for child in node.children() {
            if child.is_element() {
                stack.push((child, depth + 1));
            }
        }
    }
    deepest
}
