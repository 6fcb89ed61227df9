//! Data table detection.

use serde::Serialize;

use crate::dom::{self, Document};

const HEADER_SAMPLE: usize = 10;

/// A `table` with more than one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePattern {
    pub row_count: usize,
    /// Header count, or the first row's cell count when there are no headers.
    pub column_count: usize,
    /// Up to ten header texts.
    pub headers: Vec<String>,
    pub has_headers: bool,
    pub classes: Vec<String>,
}

#[must_use]
pub fn table_patterns(doc: &Document) -> Vec<TablePattern> {
    let mut patterns = Vec::new();

    for table in dom::elements_of(&doc.select("table")) {
        let rows = dom::elements_of(&table.select("tr"));
        if rows.len() <= 1 {
            continue;
        }

        let headers: Vec<String> = dom::elements_of(&table.select("th"))
            .iter()
            .map(dom::clean_text)
            .collect();

        let column_count = if headers.is_empty() {
            rows.first().map_or(0, |row| row.select("td, th").length())
        } else {
            headers.len()
        };

        patterns.push(TablePattern {
            row_count: rows.len(),
            column_count,
            has_headers: !headers.is_empty(),
            headers: headers.into_iter().take(HEADER_SAMPLE).collect(),
            classes: dom::class_tokens(&table),
        });
    }

    patterns
}
