//! Document Model
//!
//! Wraps a parsed `dom_query` tree together with the address it was fetched
//! from, and provides the small set of read-only element operations the
//! analyzer, detector and extractors share. Nothing here mutates the tree.

pub use dom_query::{NodeRef, Selection};
use url::Url;

use crate::error::{Error, Result};
use crate::patterns::WHITESPACE_NORMALIZE;
use crate::selector::utils::class_matches;
use crate::url_utils;

/// A parsed, read-only document plus its originating address.
pub struct Document {
    tree: dom_query::Document,
    address: Url,
    base: Url,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("address", &self.address.as_str())
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Parse markup fetched from `address`.
    ///
    /// Fails when the address is not an absolute http(s) URL, when the markup
    /// is blank, or when no root element could be built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rs_adaptive_extract::dom::Document;
    ///
    /// let doc = Document::parse("https://example.org/", "<ul><li>a</li></ul>")?;
    /// assert_eq!(doc.select("li").length(), 1);
    /// # Ok::<(), rs_adaptive_extract::Error>(())
    /// ```
    pub fn parse(address: &str, markup: &str) -> Result<Self> {
        Self::parse_with_final(address, markup, None)
    }

    /// Parse markup, resolving relative links against `final_address` when
    /// the fetch was redirected.
    pub fn parse_with_final(address: &str, markup: &str, final_address: Option<&str>) -> Result<Self> {
        let address = url_utils::parse_url(address)
            .ok_or_else(|| Error::InvalidAddress(address.to_string()))?;

        if markup.trim().is_empty() {
            return Err(Error::EmptyMarkup);
        }

        let base = final_address
            .and_then(url_utils::parse_url)
            .unwrap_or_else(|| address.clone());

        let tree = dom_query::Document::from(markup);
        if tree.select("html").is_empty() {
            return Err(Error::ParseError("no root element".to_string()));
        }

        Ok(Self { tree, address, base })
    }

    /// The requested address.
    #[must_use]
    pub fn address(&self) -> &Url {
        &self.address
    }

    /// The address relative links resolve against.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Select all elements matching a CSS selector known to be valid.
    #[must_use]
    pub fn select(&self, css: &str) -> Selection<'_> {
        self.tree.select(css)
    }

    /// Select elements for a selector that may be invalid.
    ///
    /// Returns `None` for an invalid selector or an empty match.
    #[must_use]
    pub fn try_select(&self, css: &str) -> Option<Selection<'_>> {
        self.tree.try_select(css)
    }

    /// The `<html>` element.
    #[must_use]
    pub fn root(&self) -> Selection<'_> {
        self.tree.select("html")
    }

    /// The `<body>` element, or the root when there is none.
    #[must_use]
    pub fn body(&self) -> Selection<'_> {
        let body = self.tree.select("body");
        if body.exists() {
            body
        } else {
            self.root()
        }
    }

    /// Every element in document order.
    #[must_use]
    pub fn elements(&self) -> Vec<Selection<'_>> {
        elements_of(&self.tree.select("*"))
    }

    /// Text of the first `<title>` element.
    #[must_use]
    pub fn title(&self) -> String {
        self.tree
            .select("title")
            .nodes()
            .first()
            .map(|node| clean_text(&Selection::from(*node)))
            .unwrap_or_default()
    }

    /// Resolve an href or src against the document base.
    #[must_use]
    pub fn resolve(&self, href: &str) -> String {
        url_utils::create_absolute_url(href, &self.base)
    }
}

// === Element Access ===

/// Split a selection into one selection per node.
#[must_use]
pub fn elements_of<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes().iter().map(|node| Selection::from(*node)).collect()
}

/// Direct element children of the first node.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    elements_of(&sel.children())
}

/// Get tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Get any attribute value.
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Element id, empty when absent.
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> String {
    attr(sel, "id").unwrap_or_default()
}

/// Class attribute split into tokens, in source order.
#[must_use]
pub fn class_tokens(sel: &Selection) -> Vec<String> {
    sel.attr("class")
        .map(|class| class.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// All attributes of a node as name/value pairs, in source order.
#[must_use]
pub fn attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

// === Text ===

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// Rendered text of the selection, whitespace-normalized.
#[must_use]
pub fn clean_text(sel: &Selection) -> String {
    normalize_whitespace(&sel.text())
}

/// Character count of the rendered text.
#[must_use]
pub fn text_len(sel: &Selection) -> usize {
    clean_text(sel).chars().count()
}

/// Truncate to at most `max` characters on a char boundary.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

// === Querying ===

/// Whether any descendant matches a CSS selector.
#[inline]
#[must_use]
pub fn has_descendant(sel: &Selection, css: &str) -> bool {
    sel.select(css).exists()
}

/// First descendant matching `css` whose class attribute matches `pattern`.
#[must_use]
pub fn find_by_class<'a>(sel: &Selection<'a>, css: &str, pattern: &regex::Regex) -> Option<Selection<'a>> {
    sel.select(css)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|el| class_matches(el, pattern))
}

/// All descendants matching `css` whose class attribute matches `pattern`.
#[must_use]
pub fn find_all_by_class<'a>(sel: &Selection<'a>, css: &str, pattern: &regex::Regex) -> Vec<Selection<'a>> {
    sel.select(css)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|el| class_matches(el, pattern))
        .collect()
}

/// Nearest ancestor for which `rule` holds.
#[must_use]
pub fn find_ancestor<'a>(sel: &Selection<'a>, rule: impl Fn(&Selection<'a>) -> bool) -> Option<Selection<'a>> {
    let mut current = sel.nodes().first().and_then(NodeRef::parent);
    while let Some(node) = current {
        if node.is_element() {
            let el = Selection::from(node);
            if rule(&el) {
                return Some(el);
            }
        }
        current = node.parent();
    }
    None
}

// === Filtered Views ===

/// Whether the node or one of its ancestors has one of the `excluded` tags.
#[must_use]
pub fn is_within_tags(node: &NodeRef, excluded: &[&str]) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.is_element() {
            if let Some(name) = n.node_name() {
                if excluded.iter().any(|tag| name.eq_ignore_ascii_case(tag)) {
                    return true;
                }
            }
        }
        current = n.parent();
    }
    false
}

/// Trimmed, non-empty text fragments in document order, skipping any
/// subtree rooted at an `excluded` tag.
#[must_use]
pub fn text_fragments_excluding(root: &Selection, excluded: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    let Some(root_node) = root.nodes().first() else {
        return out;
    };

    let mut stack: Vec<NodeRef> = vec![*root_node];
    while let Some(node) = stack.pop() {
        if node.is_text() {
            let text = normalize_whitespace(&node.text());
            if !text.is_empty() {
                out.push(text);
            }
            continue;
        }
        if node.is_element() {
            if let Some(name) = node.node_name() {
                if excluded.iter().any(|tag| name.eq_ignore_ascii_case(tag)) {
                    continue;
                }
            }
        }
        stack.extend(node.children().into_iter().rev());
    }

    out
}
