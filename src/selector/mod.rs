//! Selector Infrastructure
//!
//! Rules are plain predicate functions over an element. They are shared by
//! the pattern detector, the classifier's structural signals and the
//! extraction routines, so none of those components depend on each other.

use dom_query::Selection;

pub mod utils;

/// A selector rule that tests if a selection matches certain criteria.
pub type Rule = fn(&Selection) -> bool;

/// Query for the first descendant element matching the rule.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::selector::{self, utils};
/// use rs_adaptive_extract::dom::Document;
///
/// let doc = Document::parse("https://example.org", r#"<div><p class="content">text</p></div>"#)?;
///
/// fn has_content_class(sel: &dom_query::Selection) -> bool {
///     utils::has_class_keyword(sel, "content")
/// }
///
/// assert!(selector::query(&doc.root(), has_content_class).is_some());
/// # Ok::<(), rs_adaptive_extract::Error>(())
/// ```
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|sel| rule(sel))
}

/// Query for all descendant elements matching the rule, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}
