//! Strategy Selector
//!
//! Turns a classification (or, on the coarse path, raw structural facts)
//! into an [`ExtractionStrategy`]: candidate element selectors tried in
//! order, the extraction routines to run against the first selector that
//! matches, and advisory notes.

pub mod advice;
pub mod templates;

use dom_query::Selection;
use serde::Serialize;

use crate::classify::{ClassificationResult, ContentType};
use crate::dom::Document;
use crate::extractor::Routine;
use crate::structure::{PageSignal, StructuralProfile};

pub use advice::{Approach, Complexity, StrategyNotes};

/// A CSS selector descriptor.
///
/// Matching never panics: an invalid selector simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementSelector(String);

impl ElementSelector {
    #[must_use]
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Elements matching this selector, or `None` when nothing matches.
    #[must_use]
    pub fn find<'d>(&self, doc: &'d Document) -> Option<Selection<'d>> {
        doc.try_select(&self.0)
    }
}

/// Coarse strategy families chosen from structural facts alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralKind {
    TableFocused,
    BlogListing,
    ProductListing,
    General,
}

/// What a strategy was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    Classified(ContentType),
    Structural(StructuralKind),
}

/// Selectors, routines and notes for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionStrategy {
    pub kind: StrategyKind,
    /// Tried in order; the first with at least one match scopes extraction.
    pub selectors: Vec<ElementSelector>,
    /// Tried in order; the first producing records wins.
    pub routines: Vec<Routine>,
    pub notes: StrategyNotes,
}

impl ExtractionStrategy {
    fn from_template(kind: StrategyKind, template: &templates::Template) -> Self {
        Self {
            kind,
            selectors: template.selectors.iter().map(|css| ElementSelector::new(*css)).collect(),
            routines: template.routines.to_vec(),
            notes: StrategyNotes::default(),
        }
    }

    /// Attach advisory notes.
    #[must_use]
    pub fn with_notes(mut self, notes: StrategyNotes) -> Self {
        self.notes = notes;
        self
    }

    /// First selector with at least one match, together with its matches.
    #[must_use]
    pub fn scope<'d>(&self, doc: &'d Document) -> Option<(&ElementSelector, Selection<'d>)> {
        self.selectors
            .iter()
            .find_map(|selector| selector.find(doc).map(|matches| (selector, matches)))
    }
}

/// Strategy for a classified document.
///
/// Total: content types without a dedicated template get the general one.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::classify::{ClassificationResult, ContentType};
/// use rs_adaptive_extract::extractor::Routine;
/// use rs_adaptive_extract::strategy;
///
/// let classification = ClassificationResult {
///     content_type: ContentType::SportsMatches,
///     confidence: 70,
///     matched_definition: "sports_live".to_string(),
/// };
/// let plan = strategy::select(&classification);
/// assert_eq!(plan.routines, vec![Routine::FixtureMatches]);
/// ```
#[must_use]
pub fn select(classification: &ClassificationResult) -> ExtractionStrategy {
    let content_type = classification.content_type;
    let template = templates::template(content_type);
    let strategy = ExtractionStrategy::from_template(StrategyKind::Classified(content_type), &template);

    tracing::debug!(
        content_type = %content_type,
        selectors = strategy.selectors.len(),
        routines = ?strategy.routines,
        "strategy selected"
    );

    strategy
}

/// Coarse structural family for a profile.
#[must_use]
pub fn structural_kind(profile: &StructuralProfile) -> StructuralKind {
    let signals = &profile.signals;
    if signals.has(PageSignal::TabularData) {
        StructuralKind::TableFocused
    } else if signals.has(PageSignal::BlogListing) {
        StructuralKind::BlogListing
    } else if signals.has(PageSignal::ProductListing) {
        StructuralKind::ProductListing
    } else {
        StructuralKind::General
    }
}

/// Strategy derived from structural facts only, without classification.
#[must_use]
pub fn select_from_profile(profile: &StructuralProfile) -> ExtractionStrategy {
    let kind = structural_kind(profile);
    let template = templates::structural_template(kind);

    tracing::debug!(kind = ?kind, "structural strategy selected");

    ExtractionStrategy::from_template(StrategyKind::Structural(kind), &template)
}
