//! List extraction: one record per direct list item, no cap.

use dom_query::Selection;

use super::record::ExtractedRecord;
use super::scoped;
use crate::dom::{self, Document};

const LIST_CSS: &str = "ul, ol";

fn item_record(doc: &Document, list_index: usize, item_index: usize, item: &Selection) -> ExtractedRecord {
    let mut record = ExtractedRecord::new(doc.address().as_str());
    record.insert("list_index", list_index);
    record.insert("item_index", item_index);
    record.insert("text", dom::clean_text(item));

    let link = item
        .select("a[href]")
        .nodes()
        .first()
        .map(|node| Selection::from(*node));
    if let Some(link) = link {
        if let Some(href) = dom::attr(&link, "href") {
            record.insert("link_url", doc.resolve(&href));
            record.insert("link_text", dom::clean_text(&link));
        }
    }
    record
}

/// Records for every `li` directly under a `ul` or `ol`.
///
/// A scope holding no list at all is ignored and the whole document is
/// searched instead.
#[must_use]
pub fn extract<'a>(doc: &'a Document, scope: Option<&Selection<'a>>) -> Vec<ExtractedRecord> {
    let mut lists = scoped(doc, scope, LIST_CSS);
    if lists.is_empty() && scope.is_some() {
        tracing::debug!("scope holds no lists, searching the whole document");
        lists = scoped(doc, None, LIST_CSS);
    }

    let mut records = Vec::new();
    for (list_index, list) in lists.iter().enumerate() {
        let items = dom::element_children(list)
            .into_iter()
            .filter(|child| dom::tag_name(child).as_deref() == Some("li"));
        for (item_index, item) in items.enumerate() {
            records.push(item_record(doc, list_index, item_index, &item));
        }
    }

    tracing::debug!(records = records.len(), "list extraction");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::FieldValue;

    fn doc(markup: &str) -> Document {
        Document::parse("https://example.org/links/", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_one_record_per_direct_item() {
        let d = doc(r#"
            <ul>
              <li><a href="a.html">Alpha</a></li>
              <li>Beta <ol><li>nested</li></ol></li>
            </ul>
        "#);
        let records = extract(&d, None);

        // ul has two items, the nested ol has one.
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text("link_url"), Some("https://example.org/links/a.html"));
        assert_eq!(records[0].text("link_text"), Some("Alpha"));
        assert_eq!(records[1].text("text"), Some("Beta nested"));
        assert!(!records[1].contains("link_url"));
        assert_eq!(records[2].get("list_index"), Some(&FieldValue::Number(1)));
        assert_eq!(records[2].get("item_index"), Some(&FieldValue::Number(0)));
    }

    #[test]
    fn test_sibling_lists_in_scope() {
        let d = doc("<ul><li>u0</li><li>u1</li></ul><ol><li>o0</li></ol>");
        let scope = d.select("ul, ol");
        let texts: Vec<String> = extract(&d, Some(&scope))
            .iter()
            .filter_map(|r| r.text("text").map(str::to_string))
            .collect();

        assert_eq!(texts, vec!["u0", "u1", "o0"]);
    }

    #[test]
    fn test_scope_without_lists_is_widened() {
        let d = doc("<div class='recipe'>text</div><ol><li>step</li></ol>");
        let scope = d.select("div.recipe");

        assert_eq!(extract(&d, Some(&scope)).len(), 1);
    }

    #[test]
    fn test_no_lists() {
        assert!(extract(&doc("<p>none</p>"), None).is_empty());
    }
}
