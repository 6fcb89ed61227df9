//! Advisory notes attached to a strategy.
//!
//! Notes describe how hard the page looks to extract and what a caller might
//! do about it. They never change which routines run.

use serde::Serialize;

use crate::detect::ContentPattern;
use crate::structure::{PaginationKind, StructuralProfile};

/// Threshold above which `javascript:` links are called out.
const JAVASCRIPT_LINK_WARNING: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Approach {
    TableExtraction,
    ListExtraction,
    CardExtraction,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StrategyNotes {
    pub approach: Approach,
    pub complexity: Complexity,
    /// Suggested selector for the repeating items.
    pub selector: Option<String>,
    /// Items the suggested selector is expected to match.
    pub item_count: Option<usize>,
    pub pagination: Option<PaginationKind>,
    pub challenges: Vec<String>,
    pub recommendations: Vec<String>,
}

fn class_selector(classes: &[String]) -> Option<String> {
    (!classes.is_empty()).then(|| format!(".{}", classes.join(".")))
}

/// Assess a page from its profile and detected patterns.
#[must_use]
pub fn assess(profile: &StructuralProfile, patterns: &[ContentPattern]) -> StrategyNotes {
    let mut notes = StrategyNotes::default();

    let table = patterns.iter().find(|p| matches!(p, ContentPattern::Table(_)));
    let listish = patterns.iter().find(|p| {
        matches!(
            p,
            ContentPattern::List(_) | ContentPattern::DivGroup(_) | ContentPattern::Grid(_)
        )
    });
    let card = patterns.iter().find_map(|p| match p {
        ContentPattern::Card(card) => Some(card),
        _ => None,
    });

    if table.is_some() {
        notes.approach = Approach::TableExtraction;
        notes.selector = Some("table".to_string());
    } else if let Some(pattern) = listish {
        notes.approach = Approach::ListExtraction;
        notes.complexity = Complexity::Medium;
        match pattern {
            ContentPattern::List(list) => {
                notes.selector = Some(format!("{} > li", list.tag));
                notes.item_count = Some(list.item_count);
            }
            ContentPattern::DivGroup(group) => {
                notes.selector = class_selector(&group.item_classes);
                notes.item_count = Some(group.item_count);
            }
            ContentPattern::Grid(grid) => {
                notes.selector = class_selector(&grid.container_classes).map(|s| format!("{s} > *"));
                notes.item_count = Some(grid.item_count);
            }
            _ => {}
        }
    } else if let Some(card) = card {
        notes.approach = Approach::CardExtraction;
        notes.complexity = Complexity::Medium;
        notes.selector = class_selector(&card.classes);
        notes.item_count = Some(card.count);
    }

    if let Some(framework) = profile.dynamic.spa_framework {
        notes.complexity = Complexity::High;
        notes.challenges.push(format!(
            "{framework:?} application detected; content may need JavaScript rendering"
        ));
        notes
            .recommendations
            .push("Render the page in a headless browser before extraction".to_string());
    }

    if profile.pagination.detected {
        notes.pagination = profile.pagination.kind;
        notes
            .recommendations
            .push("Follow pagination links to collect every page".to_string());
    }

    if profile.forms.total > 0 {
        notes
            .challenges
            .push("Forms present; some content may sit behind authentication".to_string());
    }

    if profile.links.javascript > JAVASCRIPT_LINK_WARNING {
        notes
            .challenges
            .push("Many javascript: links; navigation may need browser automation".to_string());
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect;
    use crate::dom::Document;
    use crate::structure;

    fn assess_markup(markup: &str) -> StrategyNotes {
        let doc = Document::parse("https://example.org/", markup).unwrap_or_else(|e| panic!("{e}"));
        assess(&structure::analyze(&doc), &detect::detect(&doc))
    }

    #[test]
    fn test_tables_win() {
        let notes = assess_markup(
            "<table><tr><td>1</td></tr><tr><td>2</td></tr></table><ul><li>a</li><li>b</li><li>c</li></ul>",
        );
        assert_eq!(notes.approach, Approach::TableExtraction);
        assert_eq!(notes.complexity, Complexity::Low);
        assert_eq!(notes.selector.as_deref(), Some("table"));
    }

    #[test]
    fn test_list_selector() {
        let notes = assess_markup("<ol><li>a</li><li>b</li><li>c</li></ol>");
        assert_eq!(notes.approach, Approach::ListExtraction);
        assert_eq!(notes.selector.as_deref(), Some("ol > li"));
        assert_eq!(notes.item_count, Some(3));
    }

    #[test]
    fn test_card_selector() {
        let notes = assess_markup(&"<span class='tile big'>x</span>".repeat(3));
        assert_eq!(notes.approach, Approach::CardExtraction);
        assert_eq!(notes.selector.as_deref(), Some(".tile.big"));
    }

    #[test]
    fn test_spa_and_pagination_notes() {
        let notes = assess_markup(
            r#"<script src="/js/vue.global.js"></script><a href="/?page=2">2</a><form></form>"#,
        );
        assert_eq!(notes.approach, Approach::Unknown);
        assert_eq!(notes.complexity, Complexity::High);
        assert_eq!(notes.pagination, Some(PaginationKind::Numbered));
        assert_eq!(notes.challenges.len(), 2);
        assert_eq!(notes.recommendations.len(), 2);
    }
}
