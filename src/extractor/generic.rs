//! Generic fallback: one record summarizing the page.
//!
//! Reads the tree through an exclusion filter so chrome (scripts, styles,
//! navigation, header and footer) never reaches the record. The tree itself
//! is left untouched.

use dom_query::Selection;

use super::record::{ExtractedRecord, Link};
use crate::dom::{self, Document};
use crate::Options;

/// Subtrees skipped by the fallback.
pub const EXCLUDED_TAGS: [&str; 5] = ["script", "style", "nav", "footer", "header"];

fn visible<'a>(doc: &'a Document, css: &str) -> impl Iterator<Item = Selection<'a>> {
    doc.select(css)
        .nodes()
        .iter()
        .filter(|node| !dom::is_within_tags(node, &EXCLUDED_TAGS))
        .map(|node| Selection::from(*node))
        .collect::<Vec<_>>()
        .into_iter()
}

/// The page summary record.
///
/// Always carries `source_url`, `title`, `main_content`, `headings`, `links`
/// and `images`, even when some of them are empty.
#[must_use]
pub fn extract(doc: &Document, options: &Options) -> ExtractedRecord {
    let mut record = ExtractedRecord::new(doc.address().as_str());
    record.insert("title", doc.title());

    let text = dom::text_fragments_excluding(&doc.root(), &EXCLUDED_TAGS).join("\n");
    record.insert("main_content", dom::truncate_chars(&text, options.generic_text_limit));

    let headings: Vec<String> = visible(doc, "h1, h2, h3")
        .map(|h| dom::clean_text(&h))
        .take(options.generic_heading_limit)
        .collect();
    record.insert("headings", headings);

    let links: Vec<Link> = visible(doc, "a[href]")
        .filter_map(|a| {
            let href = dom::attr(&a, "href")?;
            Some(Link {
                text: dom::clean_text(&a),
                url: doc.resolve(&href),
            })
        })
        .take(options.generic_link_limit)
        .collect();
    record.insert("links", links);

    let images: Vec<String> = visible(doc, "img[src]")
        .filter_map(|img| dom::attr(&img, "src"))
        .map(|src| doc.resolve(&src))
        .take(options.generic_image_limit)
        .collect();
    record.insert("images", images);

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::FieldValue;

    fn doc(markup: &str) -> Document {
        Document::parse("https://example.org/docs/", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_skips_page_chrome() {
        let d = doc(r#"
            <html><head><title>Guide</title><style>p { color: red }</style></head>
            <body>
              <header><h1>Site</h1><a href="/">Home</a></header>
              <nav><a href="/nav">Nav</a></nav>
              <h2>Install</h2>
              <p>Run the installer.</p>
              <a href="setup.html">Setup</a>
              <img src="/logo.png">
              <script>track();</script>
              <footer>Copyright</footer>
            </body></html>
        "#);
        let record = extract(&d, &Options::default());

        assert_eq!(record.text("title"), Some("Guide"));
        let text = record.text("main_content").unwrap_or_default();
        assert!(text.contains("Run the installer."));
        assert!(!text.contains("track()"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("color: red"));

        assert_eq!(record.get("headings"), Some(&FieldValue::List(vec!["Install".to_string()])));
        assert_eq!(
            record.get("links"),
            Some(&FieldValue::Links(vec![Link {
                text: "Setup".to_string(),
                url: "https://example.org/docs/setup.html".to_string(),
            }]))
        );
        assert_eq!(
            record.get("images"),
            Some(&FieldValue::List(vec!["https://example.org/logo.png".to_string()]))
        );

        // The tree is still intact for other readers.
        assert!(d.select("script").exists());
    }

    #[test]
    fn test_limits() {
        let markup: String = (0..30).map(|i| format!("<h3>H{i}</h3><a href='/{i}'>L{i}</a>")).collect();
        let options = Options {
            generic_text_limit: 10,
            ..Options::default()
        };
        let record = extract(&doc(&markup), &options);

        assert_eq!(record.text("main_content").map(|t| t.chars().count()), Some(10));
        assert!(matches!(record.get("headings"), Some(FieldValue::List(h)) if h.len() == 10));
        assert!(matches!(record.get("links"), Some(FieldValue::Links(l)) if l.len() == 20));
    }

    #[test]
    fn test_fields_present_on_sparse_page() {
        let record = extract(&doc("<p>hi</p>"), &Options::default());
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["source_url", "title", "main_content", "headings", "links", "images"]);
    }
}
