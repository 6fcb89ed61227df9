//! Blog and news listings.

use dom_query::Selection;

use super::record::ExtractedRecord;
use super::{first_link, first_text, repeated_items, scoped_items};
use crate::dom::{self, Document};
use crate::patterns::{ARTICLE_CLASS, AUTHOR_CLASS, DATE_CLASS, PREVIEW_CLASS};
use crate::selector::{self, utils};
use crate::Options;

/// Characters kept from a content preview.
pub const PREVIEW_LIMIT: usize = 300;

fn is_article_like(sel: &Selection) -> bool {
    utils::class_matches(sel, &ARTICLE_CLASS)
}

fn is_article_container(sel: &Selection) -> bool {
    dom::tag_name(sel).as_deref() == Some("article") || is_article_like(sel)
}

/// Article containers, reduced to the repeated items so a `div.posts`
/// wrapper gives way to the posts inside it.
fn containers<'a>(doc: &'a Document, scope: Option<&Selection<'a>>) -> Vec<Selection<'a>> {
    let found = match scope {
        Some(scope) => scoped_items(scope, is_article_container),
        None => {
            let articles = dom::elements_of(&doc.select("article"));
            if articles.is_empty() {
                selector::query_all(&doc.root(), is_article_like)
            } else {
                articles
            }
        }
    };
    repeated_items(found)
}

fn class_text(sel: &Selection, css: &str, pattern: &regex::Regex) -> Option<String> {
    dom::find_by_class(sel, css, pattern)
        .map(|el| dom::clean_text(&el))
        .filter(|text| !text.is_empty())
}

fn article_record(doc: &Document, index: usize, article: &Selection) -> Option<ExtractedRecord> {
    let mut record = ExtractedRecord::new(doc.address().as_str());
    record.insert("article_index", index);

    record.insert_opt("title", first_text(article, "h1, h2, h3"));
    record.insert_opt("date", class_text(article, "*", &DATE_CLASS));
    record.insert_opt("author", class_text(article, "*", &AUTHOR_CLASS));
    record.insert_opt(
        "content_preview",
        class_text(article, "p, div", &PREVIEW_CLASS).map(|text| dom::truncate_chars(&text, PREVIEW_LIMIT)),
    );
    record.insert_opt("article_url", first_link(doc, article));

    (record.len() > 2).then_some(record)
}

/// Records for `<article>` elements, or post/entry-classed elements when the
/// page has none. Capped at `options.max_article_records`.
#[must_use]
pub fn extract<'a>(doc: &'a Document, scope: Option<&Selection<'a>>, options: &Options) -> Vec<ExtractedRecord> {
    let articles = containers(doc, scope);
    let mut records = Vec::new();

    for (index, article) in articles.iter().take(options.max_article_records).enumerate() {
        match article_record(doc, index, article) {
            Some(record) => records.push(record),
            None => tracing::debug!(index, "article skipped: no fields found"),
        }
    }

    tracing::debug!(candidates = articles.len(), records = records.len(), "article extraction");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str) -> Document {
        Document::parse("https://blog.test/archive/", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn test_article_fields() {
        let d = doc(r#"
            <article>
              <h2><a href="/2024/05/hello">Hello</a></h2>
              <span class="post-date">May 1</span>
              <span class="author">Sam</span>
              <p class="excerpt">First   post.</p>
            </article>
        "#);
        let records = extract(&d, None, &Options::default());

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.text("title"), Some("Hello"));
        assert_eq!(r.text("date"), Some("May 1"));
        assert_eq!(r.text("author"), Some("Sam"));
        assert_eq!(r.text("content_preview"), Some("First post."));
        assert_eq!(r.text("article_url"), Some("https://blog.test/2024/05/hello"));
    }

    #[test]
    fn test_class_fallback_when_no_article_tags() {
        let d = doc(r#"
            <div class="entry"><h3>One</h3></div>
            <div class="entry"><h3>Two</h3></div>
        "#);
        let records = extract(&d, None, &Options::default());

        let titles: Vec<&str> = records.iter().filter_map(|r| r.text("title")).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn test_posts_wrapper_yields_each_post() {
        let posts: String = (0..4)
            .map(|i| format!(r#"<div class="post-item"><h3>Post {i}</h3><a href="/p/{i}">read</a></div>"#))
            .collect();
        let d = doc(&format!(r#"<div class="posts">{posts}</div>"#));
        let scope = d.select(r#"div[class*="post"]"#);

        let records = extract(&d, Some(&scope), &Options::default());
        let titles: Vec<&str> = records.iter().filter_map(|r| r.text("title")).collect();
        assert_eq!(titles, vec!["Post 0", "Post 1", "Post 2", "Post 3"]);
        assert_eq!(records[3].text("article_url"), Some("https://blog.test/p/3"));
    }

    #[test]
    fn test_article_cap() {
        let markup: String = (0..40).map(|i| format!("<article><h2>Post {i}</h2></article>")).collect();
        let records = extract(&doc(&markup), None, &Options::default());
        assert_eq!(records.len(), 30);
    }

    #[test]
    fn test_empty_articles_yield_nothing() {
        let records = extract(&doc("<article></article><article> </article>"), None, &Options::default());
        assert!(records.is_empty());
    }
}
