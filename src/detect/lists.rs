//! List, div-group and grid/flex detection.

use std::collections::{BTreeMap, HashMap};

use dom_query::Selection;
use serde::Serialize;

use crate::dom::{self, Document};
use crate::selector::utils;
use crate::Options;

const GRID_KEYWORDS: [&str; 5] = ["grid", "flex", "row", "col", "column"];

/// An `ol`/`ul` with enough direct items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPattern {
    pub tag: String,
    pub item_count: usize,
    /// Class tokens of the first item.
    pub item_classes: Vec<String>,
    /// The first item contains a link.
    pub has_links: bool,
    /// The first item contains an image.
    pub has_images: bool,
    pub avg_text_length: usize,
}

/// Elements sharing the same class signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivGroupPattern {
    pub item_count: usize,
    /// The shared, sorted class tokens.
    pub item_classes: Vec<String>,
    pub has_links: bool,
    pub has_images: bool,
    pub has_headings: bool,
    pub avg_text_length: usize,
}

/// A grid or flex container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridPattern {
    pub tag: String,
    pub container_classes: Vec<String>,
    pub item_count: usize,
    /// Direct children per tag name.
    pub child_tags: BTreeMap<String, usize>,
}

fn average_text_length(items: &[Selection]) -> usize {
    if items.is_empty() {
        return 0;
    }
    items.iter().map(dom::text_len).sum::<usize>() / items.len()
}

fn direct_items<'a>(list: &Selection<'a>) -> Vec<Selection<'a>> {
    dom::element_children(list)
        .into_iter()
        .filter(|child| dom::tag_name(child).as_deref() == Some("li"))
        .collect()
}

/// Lists whose direct `li` count reaches `list_min_items`, in document order.
#[must_use]
pub fn list_patterns(doc: &Document, options: &Options) -> Vec<ListPattern> {
    let mut patterns = Vec::new();

    for list in dom::elements_of(&doc.select("ul, ol")) {
        if patterns.len() >= options.max_list_patterns {
            break;
        }

        let items = direct_items(&list);
        if items.len() < options.list_min_items {
            continue;
        }
        let Some(first) = items.first() else {
            continue;
        };

        patterns.push(ListPattern {
            tag: dom::tag_name(&list).unwrap_or_default(),
            item_count: items.len(),
            item_classes: dom::class_tokens(first),
            has_links: dom::has_descendant(first, "a"),
            has_images: dom::has_descendant(first, "img"),
            avg_text_length: average_text_length(&items),
        });
    }

    patterns
}

/// Groups of elements with an identical class signature, largest first.
#[must_use]
pub fn div_groups(doc: &Document, options: &Options) -> Vec<DivGroupPattern> {
    let mut groups: Vec<(String, Vec<Selection>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for element in doc.elements() {
        let signature = utils::class_signature(&dom::class_tokens(&element));
        if signature.is_empty() {
            continue;
        }
        match index.get(&signature) {
            Some(&slot) => groups[slot].1.push(element),
            None => {
                index.insert(signature.clone(), groups.len());
                groups.push((signature, vec![element]));
            }
        }
    }

    let mut patterns: Vec<DivGroupPattern> = groups
        .into_iter()
        .filter(|(_, members)| members.len() >= options.div_group_min_members)
        .filter_map(|(signature, members)| {
            let sample = members.first()?;
            Some(DivGroupPattern {
                item_count: members.len(),
                item_classes: signature.split(' ').map(str::to_string).collect(),
                has_links: dom::has_descendant(sample, "a"),
                has_images: dom::has_descendant(sample, "img"),
                has_headings: dom::has_descendant(sample, "h1, h2, h3, h4, h5, h6"),
                avg_text_length: average_text_length(&members),
            })
        })
        .collect();

    patterns.sort_by(|a, b| b.item_count.cmp(&a.item_count));
    patterns.truncate(options.max_div_groups);
    patterns
}

/// Grid/flex containers with enough direct children, in document order.
#[must_use]
pub fn grid_patterns(doc: &Document, options: &Options) -> Vec<GridPattern> {
    let mut patterns = Vec::new();

    for container in dom::elements_of(&doc.select("div, section, ul")) {
        if patterns.len() >= options.max_grid_patterns {
            break;
        }

        let classes = dom::class_tokens(&container);
        if !utils::tokens_contain_any(&classes, &GRID_KEYWORDS) {
            continue;
        }

        let children = dom::element_children(&container);
        if children.len() < options.grid_min_children {
            continue;
        }

        let mut child_tags = BTreeMap::new();
        for child in &children {
            if let Some(tag) = dom::tag_name(child) {
                *child_tags.entry(tag).or_insert(0) += 1;
            }
        }

        patterns.push(GridPattern {
            tag: dom::tag_name(&container).unwrap_or_default(),
            container_classes: classes,
            item_count: children.len(),
            child_tags,
        });
    }

    patterns
}
