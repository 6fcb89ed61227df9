//! Best-effort embedded metadata: JSON-LD, Open Graph and Twitter cards.
//!
//! Malformed JSON-LD blocks are skipped silently.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::dom::{self, Document};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredData {
    /// Parsed JSON-LD blocks in document order.
    pub json_ld: Vec<Value>,
    /// `og:*` properties.
    pub open_graph: BTreeMap<String, String>,
    /// `twitter:*` names.
    pub twitter_cards: BTreeMap<String, String>,
}

impl StructuredData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.json_ld.is_empty() && self.open_graph.is_empty() && self.twitter_cards.is_empty()
    }
}

#[must_use]
pub fn extract(doc: &Document) -> StructuredData {
    let mut data = StructuredData::default();

    for script in dom::elements_of(&doc.select(r#"script[type="application/ld+json"]"#)) {
        let raw = script.text();
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => data.json_ld.push(value),
            Err(err) => tracing::debug!(error = %err, "skipping malformed JSON-LD block"),
        }
    }

    for meta in dom::elements_of(&doc.select("meta[property^='og:']")) {
        if let Some(property) = dom::attr(&meta, "property") {
            data.open_graph
                .insert(property, dom::attr(&meta, "content").unwrap_or_default());
        }
    }

    for meta in dom::elements_of(&doc.select("meta[name^='twitter:']")) {
        if let Some(name) = dom::attr(&meta, "name") {
            data.twitter_cards
                .insert(name, dom::attr(&meta, "content").unwrap_or_default());
        }
    }

    data
}
