//! Table-focused extraction: one record per data row.

use dom_query::Selection;

use super::record::ExtractedRecord;
use super::scoped;
use crate::dom::{self, Document};

/// Records for every row with at least one `td`, across all tables.
///
/// Header texts become field names when the row has exactly as many cells
/// as the table has `th` elements; otherwise cells are named `column_N`.
/// So is any cell whose header repeats a field the row already has, such as
/// `source_url`.
#[must_use]
pub fn extract<'a>(doc: &'a Document, scope: Option<&Selection<'a>>) -> Vec<ExtractedRecord> {
    let source_url = doc.address().as_str();
    let mut records = Vec::new();

    for (table_index, table) in scoped(doc, scope, "table").iter().enumerate() {
        let headers: Vec<String> = dom::elements_of(&table.select("th")).iter().map(dom::clean_text).collect();

        for row in dom::elements_of(&table.select("tr")) {
            let cells: Vec<String> = dom::elements_of(&row.select("td")).iter().map(dom::clean_text).collect();
            if cells.is_empty() {
                continue;
            }

            let mut record = ExtractedRecord::new(source_url);
            record.insert("table_index", table_index);
            let named = !headers.is_empty() && headers.len() == cells.len();
            for (idx, cell) in cells.into_iter().enumerate() {
                // A header never replaces a field already set on the row.
                let name = match headers.get(idx) {
                    Some(header) if named && !header.is_empty() && !record.contains(header) => header.clone(),
                    _ => format!("column_{idx}"),
                };
                record.insert(&name, cell);
            }
            records.push(record);
        }
    }

    tracing::debug!(records = records.len(), "table extraction");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::FieldValue;

    fn doc(markup: &str) -> Document {
        Document::parse("https://example.org/stats", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_headers_become_field_names() {
        let d = doc(r"
            <table>
              <tr><th>Name</th><th>Score</th></tr>
              <tr><td>Ada</td><td>9</td></tr>
              <tr><td>Linus</td><td>7</td></tr>
            </table>
        ");
        let records = extract(&d, None);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("Name"), Some("Ada"));
        assert_eq!(records[1].text("Score"), Some("7"));
        assert_eq!(records[0].get("table_index"), Some(&FieldValue::Number(0)));
        assert_eq!(records[0].text("source_url"), Some("https://example.org/stats"));
    }

    #[test]
    fn test_mismatched_rows_use_positional_names() {
        let d = doc(r"
            <table><tr><th>Only</th></tr><tr><td>a</td><td>b</td></tr></table>
            <table><tr><td>x</td></tr></table>
        ");
        let records = extract(&d, None);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text("column_0"), Some("a"));
        assert_eq!(records[0].text("column_1"), Some("b"));
        assert_eq!(records[1].get("table_index"), Some(&FieldValue::Number(1)));
    }

    #[test]
    fn test_headers_cannot_overwrite_existing_fields() {
        let d = doc(r"
            <table>
              <tr><th>source_url</th><th>table_index</th><th>Name</th><th>Name</th></tr>
              <tr><td>spoof</td><td>99</td><td>Ada</td><td>Byron</td></tr>
            </table>
        ");
        let records = extract(&d, None);

        let r = &records[0];
        assert_eq!(r.text("source_url"), Some("https://example.org/stats"));
        assert_eq!(r.get("table_index"), Some(&FieldValue::Number(0)));
        assert_eq!(r.text("column_0"), Some("spoof"));
        assert_eq!(r.text("column_1"), Some("99"));
        assert_eq!(r.text("Name"), Some("Ada"));
        assert_eq!(r.text("column_3"), Some("Byron"));
    }

    #[test]
    fn test_scope_limits_tables() {
        let d = doc(r#"
            <table><tr><td>outside</td></tr></table>
            <div class="stock"><table><tr><td>inside</td></tr></table></div>
        "#);
        let scope = d.select("div.stock");
        let records = extract(&d, Some(&scope));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("column_0"), Some("inside"));
    }

    #[test]
    fn test_no_tables_yields_nothing() {
        assert!(extract(&doc("<p>prose</p>"), None).is_empty());
    }
}
