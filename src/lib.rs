//! # rs-adaptive-extract
//!
//! Content-type classification and adaptive record extraction for fetched
//! web pages.
//!
//! Given a page's address and markup, the library works out what kind of
//! content the page holds (product listing, news, fixtures, documentation,
//! ...), computes structural facts about it, and runs the extraction routine
//! suited to that kind, producing flat records ready for tabular export.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_adaptive_extract::{process, RecordSource};
//!
//! let markup = format!(
//!     r#"<html><body>{}<p>{}</p></body></html>"#,
//!     r#"<div class="product-card"><h3 class="title">Lamp</h3><span class="price">$20</span></div>"#.repeat(5),
//!     "Free shipping on every order. ".repeat(20),
//! );
//!
//! let report = process("https://shop.test/catalog", &markup)?;
//! assert_eq!(report.records.len(), 5);
//! assert_eq!(report.records[0].text("title"), Some("Lamp"));
//! assert!(matches!(report.record_source, RecordSource::Strategy { .. }));
//! # Ok::<(), rs_adaptive_extract::Error>(())
//! ```
//!
//! ## Stages
//!
//! - **Structure**: tag counts, depth, inventories, main content, listing signals
//! - **Detect**: repeating lists, class groups, grids, cards, tables, text blocks
//! - **Classify**: URL keywords and structural indicators scored per content type
//! - **Strategy**: selectors and routines for the chosen content type
//! - **Extractor**: routines producing records, with a generic fallback
//!
//! The whole pipeline is synchronous. Parsed documents are never mutated, so
//! a document may be shared freely between stages.

mod error;
mod options;
mod patterns;
mod result;

/// Parsed document wrapper and read-only element helpers.
pub mod dom;

/// Rule-based element queries and class/id token predicates.
pub mod selector;

/// URL validation and resolution.
pub mod url_utils;

/// Character encoding detection for byte input.
pub mod encoding;

/// Structural analysis of a document.
pub mod structure;

/// Repeating-pattern detection.
pub mod detect;

/// Content-type registry and classifier.
pub mod classify;

/// Strategy templates and advisory notes.
pub mod strategy;

/// Extraction routines and the record model.
pub mod extractor;

/// Login and authentication wall heuristics.
pub mod access;

/// End-to-end orchestration.
pub mod pipeline;

// Public API - re-exports
pub use classify::{ClassificationResult, ContentType, Registry};
pub use error::{Error, Result};
pub use extractor::{ExtractedRecord, FieldValue, Routine};
pub use options::{Options, ProfileDepth};
pub use pipeline::FetchedPage;
pub use result::{ExtractionReport, RecordSource};
pub use strategy::ExtractionStrategy;
pub use structure::StructuralProfile;

/// Processes a page with default options.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::{process, Error};
///
/// let err = process("ftp://example.org/file", "<p>x</p>").err();
/// assert!(matches!(err, Some(Error::InvalidAddress(_))));
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn process(address: &str, markup: &str) -> Result<ExtractionReport> {
    process_with_options(address, markup, &Options::default())
}

/// Processes a page with custom options.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::{process_with_options, Options};
///
/// let options = Options {
///     check_access_wall: false,
///     skip_classification: true,
///     ..Options::default()
/// };
/// let report = process_with_options("https://example.org/", "<p>Hello</p>", &options)?;
/// assert!(report.classification.is_none());
/// assert_eq!(report.records.len(), 1);
/// # Ok::<(), rs_adaptive_extract::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn process_with_options(address: &str, markup: &str, options: &Options) -> Result<ExtractionReport> {
    pipeline::process_with(&FetchedPage::new(address, markup), None, Registry::builtin(), options)
}

/// Processes raw bytes, decoding them with the charset the markup declares.
///
/// Falls back to UTF-8 when nothing is declared. Invalid sequences become
/// U+FFFD rather than errors.
#[allow(clippy::missing_errors_doc)]
pub fn process_bytes(address: &str, bytes: &[u8]) -> Result<ExtractionReport> {
    pipeline::process_bytes(address, bytes, &Options::default())
}
