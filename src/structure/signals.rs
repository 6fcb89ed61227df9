//! Coarse page signals: listing counts, pagination, dynamic content hints
//! and `data-*` attribute usage.

use std::collections::HashMap;

use serde::Serialize;

use crate::dom::{self, Document};
use crate::patterns::{CARD_CLASS, DATE_CLASS, INFINITE_SCROLL_CLASS, PRICE_CLASS};
use crate::selector::{self, utils};

const DATA_ATTRIBUTE_LIMIT: usize = 20;
const DATA_ATTRIBUTE_SAMPLES: usize = 3;
const DATA_VALUE_LIMIT: usize = 100;
const NUMBERED_PAGE_SAMPLES: usize = 5;

const PAGINATION_KEYWORDS: [&str; 8] = [
    "next",
    "prev",
    "previous",
    "page",
    "pagination",
    "more",
    "load more",
    "show more",
];

// === Listing Signals ===

/// A page-level trait derived from the listing counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSignal {
    TabularData,
    BlogListing,
    ProductListing,
    Documentation,
    Ecommerce,
    NewsArticle,
}

/// Element counts the structural strategy path works from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingSignals {
    pub tables: usize,
    pub lists: usize,
    pub articles: usize,
    /// Elements with a `card`, `item` or `product` class.
    pub cards: usize,
    pub headings: usize,
    pub links: usize,
    pub images: usize,
    pub forms: usize,
    pub videos: usize,
    pub price_elements: usize,
    pub date_elements: usize,
    /// Derived signals in a fixed order.
    pub page_signals: Vec<PageSignal>,
}

impl ListingSignals {
    #[must_use]
    pub fn has(&self, signal: PageSignal) -> bool {
        self.page_signals.contains(&signal)
    }
}

fn is_card(sel: &dom::Selection) -> bool {
    utils::class_matches(sel, &CARD_CLASS)
}

fn is_price(sel: &dom::Selection) -> bool {
    utils::class_matches(sel, &PRICE_CLASS)
}

fn is_date(sel: &dom::Selection) -> bool {
    utils::class_matches(sel, &DATE_CLASS)
}

#[must_use]
pub fn listing_signals(doc: &Document) -> ListingSignals {
    let root = doc.root();
    let mut signals = ListingSignals {
        tables: doc.select("table").length(),
        lists: doc.select("ul, ol").length(),
        articles: doc.select("article").length(),
        cards: selector::query_all(&root, is_card).len(),
        headings: doc.select("h1, h2, h3, h4, h5, h6").length(),
        links: doc.select("a[href]").length(),
        images: doc.select("img").length(),
        forms: doc.select("form").length(),
        videos: doc.select("video").length(),
        price_elements: selector::query_all(&root, is_price).len(),
        date_elements: selector::query_all(&root, is_date).len(),
        page_signals: Vec::new(),
    };

    let derived = [
        (PageSignal::TabularData, signals.tables > 0),
        (PageSignal::BlogListing, signals.articles > 1),
        (PageSignal::ProductListing, signals.cards > 3),
        (PageSignal::Documentation, signals.headings > 5 && signals.lists > 0),
        (PageSignal::Ecommerce, signals.price_elements > 0),
        (PageSignal::NewsArticle, signals.date_elements > 0),
    ];
    signals.page_signals = derived
        .into_iter()
        .filter_map(|(signal, present)| present.then_some(signal))
        .collect();

    signals
}

// === Pagination ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationKind {
    /// Digit-labelled links to page addresses.
    Numbered,
    /// Only keyword controls such as "next" or "load more".
    NextPrev,
}

/// Keyword controls found for one pagination keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationHint {
    pub keyword: String,
    pub links: usize,
    pub buttons: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub detected: bool,
    pub kind: Option<PaginationKind>,
    pub hints: Vec<PaginationHint>,
    /// Hrefs of numbered page links.
    pub sample_urls: Vec<String>,
}

#[must_use]
pub fn pagination(doc: &Document) -> Pagination {
    let link_texts: Vec<String> = dom::elements_of(&doc.select("a"))
        .iter()
        .map(|a| dom::clean_text(a).to_lowercase())
        .collect();
    let button_texts: Vec<String> = dom::elements_of(&doc.select("button"))
        .iter()
        .map(|b| dom::clean_text(b).to_lowercase())
        .collect();

    let mut result = Pagination::default();
    for keyword in PAGINATION_KEYWORDS {
        let links = link_texts.iter().filter(|t| t.contains(keyword)).count();
        let buttons = button_texts.iter().filter(|t| t.contains(keyword)).count();
        if links > 0 || buttons > 0 {
            result.detected = true;
            result.hints.push(PaginationHint {
                keyword: keyword.to_string(),
                links,
                buttons,
            });
        }
    }

    let numbered: Vec<String> = dom::elements_of(&doc.select("a[href]"))
        .iter()
        .filter_map(|a| {
            let text = dom::clean_text(a);
            let href = dom::attr(a, "href")?;
            let lower = href.to_ascii_lowercase();
            let is_number = !text.is_empty() && text.chars().all(|c| c.is_ascii_digit());
            (is_number && (lower.contains("page") || lower.contains("p="))).then_some(href)
        })
        .collect();

    if !numbered.is_empty() {
        result.detected = true;
        result.kind = Some(PaginationKind::Numbered);
        result.sample_urls = numbered.into_iter().take(NUMBERED_PAGE_SAMPLES).collect();
    } else if result.detected {
        result.kind = Some(PaginationKind::NextPrev);
    }

    result
}

// === Dynamic Content ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaFramework {
    React,
    Vue,
    Angular,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DynamicSignals {
    /// An element carries an infinite-scroll or lazy-load class.
    pub infinite_scroll: bool,
    /// Framework named by the last matching script `src`.
    pub spa_framework: Option<SpaFramework>,
}

fn is_infinite_scroll(sel: &dom::Selection) -> bool {
    utils::class_matches(sel, &INFINITE_SCROLL_CLASS)
}

#[must_use]
pub fn dynamic_signals(doc: &Document) -> DynamicSignals {
    let mut spa_framework = None;
    for script in dom::elements_of(&doc.select("script[src]")) {
        let src = dom::attr(&script, "src").unwrap_or_default().to_lowercase();
        if src.contains("react") {
            spa_framework = Some(SpaFramework::React);
        } else if src.contains("vue") {
            spa_framework = Some(SpaFramework::Vue);
        } else if src.contains("angular") {
            spa_framework = Some(SpaFramework::Angular);
        }
    }

    DynamicSignals {
        infinite_scroll: selector::query(&doc.root(), is_infinite_scroll).is_some(),
        spa_framework,
    }
}

// === Data Attributes ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataAttribute {
    pub name: String,
    pub count: usize,
    pub sample_values: Vec<String>,
}

/// `data-*` attributes ranked by occurrence, ties in first-seen order.
#[must_use]
pub fn data_attributes(doc: &Document) -> Vec<DataAttribute> {
    let mut found: Vec<DataAttribute> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for node in doc.select("*").nodes() {
        for (name, value) in dom::attributes(node) {
            if !name.starts_with("data-") {
                continue;
            }
            let slot = *index.entry(name.clone()).or_insert_with(|| {
                found.push(DataAttribute {
                    name,
                    count: 0,
                    sample_values: Vec::new(),
                });
                found.len() - 1
            });

            let entry = &mut found[slot];
            entry.count += 1;
            if entry.sample_values.len() < DATA_ATTRIBUTE_SAMPLES {
                entry.sample_values.push(dom::truncate_chars(&value, DATA_VALUE_LIMIT));
            }
        }
    }

    found.sort_by(|a, b| b.count.cmp(&a.count));
    found.truncate(DATA_ATTRIBUTE_LIMIT);
    found
}
