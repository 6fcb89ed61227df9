//! Pattern Detector
//!
//! Finds repeating or notable structures in a document. Each variant has its
//! own detector, threshold and cap; no detector reads another's output, and
//! the same element may legitimately show up in several variants (a card can
//! also be a member of a div-group).

pub mod cards;
pub mod lists;
pub mod tables;
pub mod text_blocks;

use serde::Serialize;

use crate::dom::Document;
use crate::Options;

pub use cards::CardPattern;
pub use lists::{DivGroupPattern, GridPattern, ListPattern};
pub use tables::TablePattern;
pub use text_blocks::TextBlock;

/// A detected structure, tagged by variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPattern {
    List(ListPattern),
    DivGroup(DivGroupPattern),
    Grid(GridPattern),
    Card(CardPattern),
    Table(TablePattern),
    TextBlock(TextBlock),
}

impl ContentPattern {
    /// Variant name as serialized.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::DivGroup(_) => "div_group",
            Self::Grid(_) => "grid",
            Self::Card(_) => "card",
            Self::Table(_) => "table",
            Self::TextBlock(_) => "text_block",
        }
    }
}

/// Detect patterns with default thresholds.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::detect::{self, ContentPattern};
/// use rs_adaptive_extract::dom::Document;
///
/// let doc = Document::parse(
///     "https://example.org/",
///     "<ul><li>a</li><li>b</li><li>c</li><li>d</li></ul>",
/// )?;
/// let patterns = detect::detect(&doc);
/// assert!(matches!(&patterns[..], [ContentPattern::List(list)] if list.item_count == 4));
/// # Ok::<(), rs_adaptive_extract::Error>(())
/// ```
#[must_use]
pub fn detect(doc: &Document) -> Vec<ContentPattern> {
    detect_with_options(doc, &Options::default())
}

/// Detect patterns, variant by variant.
///
/// Output order is lists, div-groups, grids, cards, tables, text blocks.
#[must_use]
pub fn detect_with_options(doc: &Document, options: &Options) -> Vec<ContentPattern> {
    let lists = lists::list_patterns(doc, options);
    let groups = lists::div_groups(doc, options);
    let grids = lists::grid_patterns(doc, options);
    let cards = cards::card_patterns(doc, options);
    let tables = tables::table_patterns(doc);
    let blocks = text_blocks::text_blocks(doc, options);

    tracing::debug!(
        lists = lists.len(),
        div_groups = groups.len(),
        grids = grids.len(),
        cards = cards.len(),
        tables = tables.len(),
        text_blocks = blocks.len(),
        "patterns detected"
    );

    let mut patterns = Vec::with_capacity(
        lists.len() + groups.len() + grids.len() + cards.len() + tables.len() + blocks.len(),
    );
    patterns.extend(lists.into_iter().map(ContentPattern::List));
    patterns.extend(groups.into_iter().map(ContentPattern::DivGroup));
    patterns.extend(grids.into_iter().map(ContentPattern::Grid));
    patterns.extend(cards.into_iter().map(ContentPattern::Card));
    patterns.extend(tables.into_iter().map(ContentPattern::Table));
    patterns.extend(blocks.into_iter().map(ContentPattern::TextBlock));
    patterns
}

/// Patterns of one variant, by serialized name.
#[must_use]
pub fn of_kind<'a>(patterns: &'a [ContentPattern], kind: &str) -> Vec<&'a ContentPattern> {
    patterns.iter().filter(|p| p.kind() == kind).collect()
}
