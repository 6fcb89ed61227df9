//! End-to-end processing of one fetched document.
//!
//! Validation, the access-wall check, parsing, structural analysis, pattern
//! detection, classification, strategy selection and extraction run in that
//! order, synchronously. Only the up-front checks can fail; everything after
//! parsing degrades toward the generic record instead.

use chrono::Utc;

use crate::classify::{self, Registry};
use crate::detect;
use crate::dom::Document;
use crate::encoding;
use crate::error::{Error, Result};
use crate::extractor::{self, ExtractedRecord};
use crate::result::{ExtractionReport, RecordSource};
use crate::strategy::{self, advice};
use crate::structure;
use crate::url_utils;
use crate::{access, Options};

/// A document handed over by the fetch collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchedPage<'a> {
    /// Requested address; must be absolute `http(s)`.
    pub address: &'a str,
    pub markup: &'a str,
    /// Address after redirects, if different.
    pub final_address: Option<&'a str>,
}

impl<'a> FetchedPage<'a> {
    #[must_use]
    pub fn new(address: &'a str, markup: &'a str) -> Self {
        Self {
            address,
            markup,
            final_address: None,
        }
    }

    #[must_use]
    pub fn with_final_address(mut self, final_address: &'a str) -> Self {
        self.final_address = Some(final_address);
        self
    }
}

/// Process a page with the built-in registry and default options.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::pipeline::{self, FetchedPage};
///
/// let markup = format!(
///     "<html><body><table><tr><th>City</th></tr><tr><td>Oslo</td></tr></table><p>{}</p></body></html>",
///     "filler ".repeat(80)
/// );
/// let report = pipeline::process(&FetchedPage::new("https://example.org/cities", &markup))?;
/// assert_eq!(report.records[0].text("City"), Some("Oslo"));
/// # Ok::<(), rs_adaptive_extract::Error>(())
/// ```
pub fn process(page: &FetchedPage) -> Result<ExtractionReport> {
    process_with(page, None, Registry::builtin(), &Options::default())
}

/// Process a page.
///
/// When `pre_extracted` holds at least one record those records are used
/// as-is and no routine runs; the profile, patterns and classification are
/// still computed.
pub fn process_with(
    page: &FetchedPage,
    pre_extracted: Option<Vec<ExtractedRecord>>,
    registry: &Registry,
    options: &Options,
) -> Result<ExtractionReport> {
    if !url_utils::is_valid_address(page.address) {
        tracing::warn!(address = page.address, "rejected: invalid address");
        return Err(Error::InvalidAddress(page.address.to_string()));
    }
    if page.markup.trim().is_empty() {
        tracing::warn!(address = page.address, "rejected: empty markup");
        return Err(Error::EmptyMarkup);
    }
    if options.check_access_wall {
        if let Err(err) = access::check(page.address, page.markup, options) {
            tracing::warn!(address = page.address, reason = %err, "rejected: access wall");
            return Err(err);
        }
    }

    let mut warnings = Vec::new();
    if let Some(final_address) = page.final_address {
        if !url_utils::is_valid_address(final_address) {
            warnings.push(format!("final address ignored: {final_address}"));
        }
    }

    let doc = Document::parse_with_final(page.address, page.markup, page.final_address)?;

    let profile = structure::analyze_with_options(&doc, options);
    let patterns = detect::detect_with_options(&doc, options);

    let (classification, plan) = if options.skip_classification {
        (None, strategy::select_from_profile(&profile))
    } else {
        let classification = classify::classify_with_registry(registry, page.address, Some(&doc));
        let plan = strategy::select(&classification);
        (Some(classification), plan)
    };
    let plan = plan.with_notes(advice::assess(&profile, &patterns));

    let (records, record_source) = match pre_extracted {
        Some(records) if !records.is_empty() => (records, RecordSource::PreExtracted),
        supplied => {
            if supplied.is_some() {
                warnings.push("pre-extracted record list was empty".to_string());
            }
            let extraction = extractor::extract_with_strategy(&doc, &plan, options);
            if extraction.fallback {
                warnings.push(format!(
                    "no records from {}; used generic fallback",
                    plan.routines
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                (extraction.records, RecordSource::GenericFallback)
            } else {
                (
                    extraction.records,
                    RecordSource::Strategy {
                        routine: extraction.routine,
                    },
                )
            }
        }
    };

    tracing::info!(
        address = page.address,
        content_type = classification.as_ref().map(|c| c.content_type.as_str()),
        confidence = classification.as_ref().map(|c| c.confidence),
        records = records.len(),
        source = ?record_source,
        "document processed"
    );

    Ok(ExtractionReport {
        address: page.address.to_string(),
        final_address: page.final_address.map(str::to_string),
        analyzed_at: Utc::now(),
        profile,
        patterns,
        classification,
        strategy: plan,
        records,
        record_source,
        warnings,
    })
}

/// Process raw bytes, decoding them with the declared charset first.
pub fn process_bytes(address: &str, bytes: &[u8], options: &Options) -> Result<ExtractionReport> {
    let markup = encoding::decode_markup(bytes);
    process_with(&FetchedPage::new(address, &markup), None, Registry::builtin(), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler() -> String {
        format!("<p>{}</p>", "Plain words about nothing much. ".repeat(20))
    }

    #[test]
    fn test_rejects_before_parsing() {
        let err = process(&FetchedPage::new("not-a-url", "<p>x</p>")).err();
        assert_eq!(err, Some(Error::InvalidAddress("not-a-url".to_string())));

        let err = process(&FetchedPage::new("https://example.org/", "  ")).err();
        assert_eq!(err, Some(Error::EmptyMarkup));
    }

    #[test]
    fn test_access_wall_can_be_disabled() {
        let page = FetchedPage::new("https://example.org/page", "<p>short</p>");
        assert!(matches!(process(&page), Err(Error::AuthenticationRequired(_))));

        let options = Options {
            check_access_wall: false,
            ..Options::default()
        };
        let report = process_with(&page, None, Registry::builtin(), &options).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn test_pre_extracted_records_are_used_as_is() {
        let markup = format!("<html><body>{}</body></html>", filler());
        let page = FetchedPage::new("https://example.org/page", &markup);
        let mut supplied = ExtractedRecord::new("https://example.org/page");
        supplied.insert("title", "From elsewhere");

        let report = process_with(&page, Some(vec![supplied.clone()]), Registry::builtin(), &Options::default())
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(report.record_source, RecordSource::PreExtracted);
        assert_eq!(report.records, vec![supplied]);
        assert!(report.classification.is_some());
    }

    #[test]
    fn test_empty_pre_extracted_list_runs_routines() {
        let markup = format!("<html><body>{}</body></html>", filler());
        let page = FetchedPage::new("https://example.org/page", &markup);

        let report =
            process_with(&page, Some(Vec::new()), Registry::builtin(), &Options::default()).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(report.records.len(), 1);
        assert!(report.warnings.iter().any(|w| w.contains("pre-extracted")));
    }

    #[test]
    fn test_skip_classification_uses_structural_path() {
        let markup = format!(
            "<html><body><table><tr><td>a</td></tr><tr><td>b</td></tr></table>{}</body></html>",
            filler()
        );
        let options = Options {
            skip_classification: true,
            ..Options::default()
        };
        let page = FetchedPage::new("https://example.org/page", &markup);
        let report = process_with(&page, None, Registry::builtin(), &options).unwrap_or_else(|e| panic!("{e}"));

        assert!(report.classification.is_none());
        assert_eq!(
            report.record_source,
            RecordSource::Strategy {
                routine: extractor::Routine::TableFocused
            }
        );
        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn test_process_bytes_decodes_declared_charset() {
        let mut bytes = b"<html><head><meta charset=\"windows-1252\"><title>Caf\xE9</title></head><body>".to_vec();
        bytes.extend_from_slice(filler().as_bytes());
        bytes.extend_from_slice(b"</body></html>");

        let report =
            process_bytes("https://example.org/page", &bytes, &Options::default()).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(report.records[0].text("title"), Some("Café"));
    }
}
