//! Product and card listings.

use dom_query::Selection;

use super::record::ExtractedRecord;
use super::{first_link, repeated_items, scoped_items};
use crate::dom::{self, Document};
use crate::patterns::{DESCRIPTION_CLASS, LISTING_CLASS, PRICE_CLASS, TITLE_CLASS};
use crate::selector::{self, utils};
use crate::Options;

/// Characters kept from a description.
pub const DESCRIPTION_LIMIT: usize = 200;

/// Fields every listing record starts with.
const BASELINE_FIELDS: usize = 2;

fn is_listing_container(sel: &Selection) -> bool {
    utils::class_matches(sel, &LISTING_CLASS)
}

/// Listing containers: every element whose class looks like a product, item
/// or card (plus the scope's own elements), reduced to the repeated items so
/// a grid wrapper never stands in for its cards.
fn containers<'a>(doc: &'a Document, scope: Option<&Selection<'a>>) -> Vec<Selection<'a>> {
    let found = match scope {
        Some(scope) => scoped_items(scope, is_listing_container),
        None => selector::query_all(&doc.root(), is_listing_container),
    };
    repeated_items(found)
}

fn non_empty_text(sel: Selection) -> Option<String> {
    Some(dom::clean_text(&sel)).filter(|text| !text.is_empty())
}

fn listing_record(doc: &Document, index: usize, item: &Selection) -> Option<ExtractedRecord> {
    let mut record = ExtractedRecord::new(doc.address().as_str());
    record.insert("product_index", index);

    record.insert_opt(
        "title",
        dom::find_by_class(item, "h1, h2, h3, h4", &TITLE_CLASS).and_then(non_empty_text),
    );
    record.insert_opt("price", dom::find_by_class(item, "*", &PRICE_CLASS).and_then(non_empty_text));
    record.insert_opt(
        "description",
        dom::find_by_class(item, "*", &DESCRIPTION_CLASS)
            .and_then(non_empty_text)
            .map(|text| dom::truncate_chars(&text, DESCRIPTION_LIMIT)),
    );
    record.insert_opt(
        "image_url",
        item.select("img[src]")
            .nodes()
            .first()
            .and_then(|img| dom::attr(&Selection::from(*img), "src"))
            .filter(|src| !src.trim().is_empty())
            .map(|src| doc.resolve(&src)),
    );
    record.insert_opt("product_url", first_link(doc, item));

    (record.len() > BASELINE_FIELDS).then_some(record)
}

/// Records for listing items, capped at `options.max_listing_records`.
///
/// An item is kept only when at least one field beyond its index and source
/// address was found.
#[must_use]
pub fn extract<'a>(doc: &'a Document, scope: Option<&Selection<'a>>, options: &Options) -> Vec<ExtractedRecord> {
    let items = containers(doc, scope);
    let mut records = Vec::new();

    for (index, item) in items.iter().take(options.max_listing_records).enumerate() {
        match listing_record(doc, index, item) {
            Some(record) => records.push(record),
            None => tracing::debug!(index, "listing item skipped: no fields found"),
        }
    }

    tracing::debug!(candidates = items.len(), records = records.len(), "listing extraction");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str) -> Document {
        Document::parse("https://shop.test/catalog/", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    fn product_cards(n: usize) -> String {
        (0..n)
            .map(|i| {
                format!(r#"<div class="product-card"><h3 class="title">Item {i}</h3><span class="price">${i}.99</span></div>"#)
            })
            .collect()
    }

    #[test]
    fn test_product_cards() {
        let d = doc(&product_cards(5));
        let records = extract(&d, None, &Options::default());

        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.text("title"), Some(format!("Item {i}").as_str()));
            assert_eq!(record.text("price"), Some(format!("${i}.99").as_str()));
            assert!(record.len() >= 3);
        }
    }

    #[test]
    fn test_resolves_image_and_link() {
        let d = doc(r#"
            <div class="item">
              <a href="/p/1"><img src="img/1.jpg"></a>
              <p class="description">A sturdy chair</p>
            </div>
        "#);
        let records = extract(&d, None, &Options::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("image_url"), Some("https://shop.test/catalog/img/1.jpg"));
        assert_eq!(records[0].text("product_url"), Some("https://shop.test/p/1"));
        assert_eq!(records[0].text("description"), Some("A sturdy chair"));
    }

    #[test]
    fn test_empty_containers_are_skipped() {
        let d = doc(r#"<div class="card"></div><div class="card"><span class="cost">3</span></div>"#);
        let records = extract(&d, None, &Options::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("price"), Some("3"));
    }

    #[test]
    fn test_record_cap() {
        let d = doc(&product_cards(60));
        assert_eq!(extract(&d, None, &Options::default()).len(), 50);

        let options = Options {
            max_listing_records: 7,
            ..Options::default()
        };
        assert_eq!(extract(&d, None, &options).len(), 7);
    }

    #[test]
    fn test_grid_wrapper_yields_its_cards() {
        let d = doc(&format!(r#"<div class="product-list">{}</div>"#, product_cards(6)));

        let records = extract(&d, None, &Options::default());
        assert_eq!(records.len(), 6);
        assert_eq!(records[5].text("title"), Some("Item 5"));

        let scope = d.select(r#"div[class*="product"]"#);
        let scoped = extract(&d, Some(&scope), &Options::default());
        assert_eq!(scoped.len(), 6);
        assert_eq!(scoped[0].text("price"), Some("$0.99"));
    }

    #[test]
    fn test_card_parts_do_not_duplicate_records() {
        let d = doc(&r#"<div class="card"><div class="card-body"><h3 class="title">Desk</h3><span class="price">9</span></div></div>"#.repeat(3));
        assert_eq!(extract(&d, None, &Options::default()).len(), 3);
    }

    #[test]
    fn test_description_is_truncated() {
        let long = "x".repeat(500);
        let d = doc(&format!(r#"<div class="item"><div class="summary">{long}</div></div>"#));
        let records = extract(&d, None, &Options::default());

        let description = records[0].text("description").unwrap_or_default();
        assert_eq!(description.chars().count(), DESCRIPTION_LIMIT);
    }
}
