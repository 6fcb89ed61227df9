//! Heading, form, table, media and link inventories.
//!
//! Each inventory is an independent read-only scan over the parsed tree.

use std::collections::BTreeMap;

use dom_query::Selection;
use serde::Serialize;

use crate::dom::{self, Document};
use crate::patterns::EMBEDDED_VIDEO_SRC;
use crate::url_utils::{self, HrefKind};

/// Headings kept in the inventory sample.
const HEADING_SAMPLE: usize = 20;

/// Characters of heading text kept per entry.
const HEADING_TEXT_LIMIT: usize = 100;

const INTERNAL_LINK_SAMPLE: usize = 15;
const EXTERNAL_LINK_SAMPLE: usize = 10;

// === Headings ===

/// One heading in the inventory sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
    pub classes: Vec<String>,
}

/// Headings grouped by level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadingInventory {
    pub total: usize,
    pub by_level: BTreeMap<u8, usize>,
    /// The first headings, ordered by level and then document order.
    pub entries: Vec<HeadingEntry>,
}

/// Inventory of `h1`..`h6`, level by level.
#[must_use]
pub fn headings(doc: &Document) -> HeadingInventory {
    let mut inventory = HeadingInventory::default();

    for level in 1..=6u8 {
        let found = dom::elements_of(&doc.select(&format!("h{level}")));
        if found.is_empty() {
            continue;
        }
        inventory.total += found.len();
        inventory.by_level.insert(level, found.len());

        for heading in found {
            if inventory.entries.len() >= HEADING_SAMPLE {
                break;
            }
            inventory.entries.push(HeadingEntry {
                level,
                text: dom::truncate_chars(&dom::clean_text(&heading), HEADING_TEXT_LIMIT),
                classes: dom::class_tokens(&heading),
            });
        }
    }

    inventory
}

// === Forms ===

/// One form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDetail {
    pub action: String,
    /// Upper-cased method, `GET` when undeclared.
    pub method: String,
    /// Number of `input`, `select` and `textarea` fields.
    pub field_count: usize,
    /// `input` elements per `type` (missing type counts as `text`).
    pub field_types: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormInventory {
    pub total: usize,
    pub details: Vec<FormDetail>,
}

#[must_use]
pub fn forms(doc: &Document) -> FormInventory {
    let details: Vec<FormDetail> = dom::elements_of(&doc.select("form"))
        .iter()
        .map(form_detail)
        .collect();

    FormInventory {
        total: details.len(),
        details,
    }
}

fn form_detail(form: &Selection) -> FormDetail {
    let mut field_types = BTreeMap::new();
    for input in dom::elements_of(&form.select("input")) {
        let kind = dom::attr(&input, "type")
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "text".to_string());
        *field_types.entry(kind).or_insert(0) += 1;
    }

    FormDetail {
        action: dom::attr(form, "action").unwrap_or_default(),
        method: dom::attr(form, "method")
            .map(|m| m.trim().to_ascii_uppercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "GET".to_string()),
        field_count: form.select("input, select, textarea").length(),
        field_types,
    }
}

// === Tables ===

/// One table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDetail {
    /// All `tr` descendants, nested tables included.
    pub row_count: usize,
    pub header_count: usize,
    pub classes: Vec<String>,
    pub has_thead: bool,
    pub has_tbody: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableInventory {
    pub total: usize,
    pub details: Vec<TableDetail>,
}

#[must_use]
pub fn tables(doc: &Document) -> TableInventory {
    let details: Vec<TableDetail> = dom::elements_of(&doc.select("table"))
        .iter()
        .map(|table| TableDetail {
            row_count: table.select("tr").length(),
            header_count: table.select("th").length(),
            classes: dom::class_tokens(table),
            has_thead: dom::has_descendant(table, "thead"),
            has_tbody: dom::has_descendant(table, "tbody"),
        })
        .collect();

    TableInventory {
        total: details.len(),
        details,
    }
}

// === Media ===

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageStats {
    pub total: usize,
    pub with_alt: usize,
    /// Images with `loading` containing `lazy`.
    pub lazy_loaded: usize,
    /// Images per `src` extension.
    pub formats: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaInventory {
    pub images: ImageStats,
    pub native_video: usize,
    /// Iframes embedding a YouTube or Vimeo player.
    pub embedded_video: usize,
    pub audio: usize,
}

#[must_use]
pub fn media(doc: &Document) -> MediaInventory {
    let mut images = ImageStats::default();

    for img in dom::elements_of(&doc.select("img")) {
        images.total += 1;

        if dom::attr(&img, "alt").is_some_and(|alt| !alt.is_empty()) {
            images.with_alt += 1;
        }
        if dom::attr(&img, "loading").is_some_and(|l| l.to_ascii_lowercase().contains("lazy")) {
            images.lazy_loaded += 1;
        }
        if let Some(src) = dom::attr(&img, "src").filter(|s| !s.is_empty()) {
            *images.formats.entry(url_utils::src_extension(&src)).or_insert(0) += 1;
        }
    }

    let embedded_video = dom::elements_of(&doc.select("iframe[src]"))
        .iter()
        .filter(|frame| dom::attr(frame, "src").is_some_and(|src| EMBEDDED_VIDEO_SRC.is_match(&src)))
        .count();

    MediaInventory {
        images,
        native_video: doc.select("video").length(),
        embedded_video,
        audio: doc.select("audio").length(),
    }
}

// === Links ===

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkInventory {
    /// Every `a[href]`.
    pub total: usize,
    pub internal: usize,
    pub external: usize,
    /// Fragment-only hrefs.
    pub anchors: usize,
    /// `javascript:` hrefs.
    pub javascript: usize,
    /// Distinct resolved internal addresses, first-seen order.
    pub sample_internal: Vec<String>,
    /// Distinct resolved external addresses, first-seen order.
    pub sample_external: Vec<String>,
}

#[must_use]
pub fn links(doc: &Document) -> LinkInventory {
    let mut inventory = LinkInventory::default();

    for link in dom::elements_of(&doc.select("a[href]")) {
        let href = dom::attr(&link, "href").unwrap_or_default();
        inventory.total += 1;

        match url_utils::classify_href(&href, doc.base()) {
            (HrefKind::Anchor, _) => inventory.anchors += 1,
            (HrefKind::Script, _) => inventory.javascript += 1,
            (HrefKind::Internal, resolved) => {
                inventory.internal += 1;
                push_sample(&mut inventory.sample_internal, resolved, INTERNAL_LINK_SAMPLE);
            }
            (HrefKind::External, resolved) => {
                inventory.external += 1;
                push_sample(&mut inventory.sample_external, resolved, EXTERNAL_LINK_SAMPLE);
            }
        }
    }

    inventory
}

fn push_sample(sample: &mut Vec<String>, value: String, cap: usize) {
    if sample.len() < cap && !sample.contains(&value) {
        sample.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str) -> Document {
        Document::parse("https://example.org/docs/", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_headings_grouped_by_level() {
        let d = doc("<h2 class='sub'>B</h2><h1>A</h1><h2>C</h2><h6>D</h6>");
        let inv = headings(&d);

        assert_eq!(inv.total, 4);
        assert_eq!(inv.by_level.get(&2), Some(&2));
        assert_eq!(inv.by_level.get(&3), None);

        let order: Vec<&str> = inv.entries.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
        assert_eq!(inv.entries[1].classes, vec!["sub"]);
    }

    #[test]
    fn test_heading_sample_is_capped() {
        let markup: String = (0..30).map(|i| format!("<h3>Heading {i}</h3>")).collect();
        let inv = headings(&doc(&markup));

        assert_eq!(inv.total, 30);
        assert_eq!(inv.entries.len(), HEADING_SAMPLE);
    }

    #[test]
    fn test_form_detail() {
        let d = doc(r#"
            <form action="/search" method="post">
                <input name="q"><input type="checkbox"><input type="checkbox">
                <select></select><textarea></textarea>
            </form>
            <form></form>
        "#);
        let inv = forms(&d);

        assert_eq!(inv.total, 2);
        let first = &inv.details[0];
        assert_eq!(first.action, "/search");
        assert_eq!(first.method, "POST");
        assert_eq!(first.field_count, 5);
        assert_eq!(first.field_types.get("checkbox"), Some(&2));
        assert_eq!(first.field_types.get("text"), Some(&1));
        assert_eq!(inv.details[1].method, "GET");
    }

    #[test]
    fn test_table_detail() {
        let d = doc("<table class='data'><thead><tr><th>A</th><th>B</th></tr></thead><tr><td>1</td><td>2</td></tr></table>");
        let inv = tables(&d);

        assert_eq!(inv.total, 1);
        assert_eq!(inv.details[0].row_count, 2);
        assert_eq!(inv.details[0].header_count, 2);
        assert!(inv.details[0].has_thead);
        assert_eq!(inv.details[0].classes, vec!["data"]);
    }

    #[test]
    fn test_media_counts() {
        let d = doc(r#"
            <img src="a.jpg" alt="A"><img src="b.png" loading="lazy"><img src="c.jpg">
            <video></video>
            <iframe src="https://www.youtube.com/embed/x"></iframe>
            <iframe src="https://maps.example.com/"></iframe>
            <audio></audio>
        "#);
        let inv = media(&d);

        assert_eq!(inv.images.total, 3);
        assert_eq!(inv.images.with_alt, 1);
        assert_eq!(inv.images.lazy_loaded, 1);
        assert_eq!(inv.images.formats.get("jpg"), Some(&2));
        assert_eq!(inv.native_video, 1);
        assert_eq!(inv.embedded_video, 1);
        assert_eq!(inv.audio, 1);
    }

    #[test]
    fn test_link_inventory() {
        let d = doc(r##"
            <a href="#top">top</a>
            <a href="javascript:void(0)">js</a>
            <a href="intro">intro</a>
            <a href="/docs/intro">intro again</a>
            <a href="https://other.net/">out</a>
            <a>no href</a>
        "##);
        let inv = links(&d);

        assert_eq!(inv.total, 5);
        assert_eq!(inv.anchors, 1);
        assert_eq!(inv.javascript, 1);
        assert_eq!(inv.internal, 2);
        assert_eq!(inv.external, 1);
        assert_eq!(inv.sample_internal, vec!["https://example.org/docs/intro"]);
        assert_eq!(inv.sample_external, vec!["https://other.net/"]);
    }
}
