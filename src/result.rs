//! Result types for pipeline output.
//!
//! An [`ExtractionReport`] bundles everything one run learned about a
//! document: the structural profile, detected patterns, classification,
//! chosen strategy and the records themselves.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::ClassificationResult;
use crate::detect::ContentPattern;
use crate::extractor::{column_union, ExtractedRecord, Routine};
use crate::strategy::ExtractionStrategy;
use crate::structure::StructuralProfile;

/// Where the report's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordSource {
    /// Supplied by the caller; no routine ran.
    PreExtracted,
    /// Produced by one of the strategy's routines.
    Strategy { routine: Routine },
    /// Every strategy routine came back empty.
    GenericFallback,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// Requested address. Records carry this as `source_url`.
    pub address: String,

    /// Address after redirects, when the fetcher reported one.
    pub final_address: Option<String>,

    pub analyzed_at: DateTime<Utc>,

    pub profile: StructuralProfile,

    pub patterns: Vec<ContentPattern>,

    /// `None` when classification was skipped.
    pub classification: Option<ClassificationResult>,

    pub strategy: ExtractionStrategy,

    /// Never empty.
    pub records: Vec<ExtractedRecord>,

    pub record_source: RecordSource,

    /// Non-fatal notes about the run.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Column set for tabular export.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        column_union(&self.records)
    }

    /// Records rendered as rows against [`Self::columns`].
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        let columns = self.columns();
        self.records.iter().map(|record| record.row(&columns)).collect()
    }
}
