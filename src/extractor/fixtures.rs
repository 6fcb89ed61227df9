//! Sports fixtures.
//!
//! Containers are discovered in tiers, the first non-empty tier winning:
//!
//! 1. `div.liItem` rows (known fixture-list layout)
//! 2. `div`/`li` elements whose class mentions a match item or fixture
//! 3. links to a `/match/<id>/` detail page
//!
//! Containers inside calendar or date navigation strips are ignored. Output
//! is deduplicated on `(home_team, away_team, match_time)`.

use std::collections::HashSet;

use dom_query::Selection;

use super::record::ExtractedRecord;
use super::scoped;
use crate::dom::{self, Document};
use crate::patterns::{
    CALENDAR_CLASS, EMBEDDED_SCORE, EMBEDDED_TIME, MATCH_DETAIL_HREF, MATCH_ITEM_CLASS, TEAM_CLASS, TIME_CLASS,
};
use crate::selector::utils;
use crate::Options;

/// Links in a calendar strip above which it counts as navigation.
const CALENDAR_LINK_LIMIT: usize = 5;

/// Longest accepted kick-off time text.
const TIME_MAX_CHARS: usize = 20;

/// Longest accepted team, round, channel or competition text.
const LABEL_MAX_CHARS: usize = 100;

/// Longest accepted status text.
const STATUS_MAX_CHARS: usize = 50;

fn is_calendar_strip(sel: &Selection) -> bool {
    utils::class_matches(sel, &CALENDAR_CLASS)
        && (dom::find_ancestor(sel, |el| dom::tag_name(el).as_deref() == Some("nav")).is_some()
            || sel.select("a").length() > CALENDAR_LINK_LIMIT)
}

/// Whether the element sits in (or is) a navigation calendar.
fn in_calendar_strip(sel: &Selection) -> bool {
    is_calendar_strip(sel) || dom::find_ancestor(sel, is_calendar_strip).is_some()
}

fn short_text(sel: &Selection, max_chars: usize) -> Option<String> {
    let text = dom::clean_text(sel);
    (!text.is_empty() && text.chars().count() < max_chars).then_some(text)
}

fn first_short_text(root: &Selection, css: &str, max_chars: usize) -> Option<String> {
    root.select(css)
        .nodes()
        .first()
        .and_then(|node| short_text(&Selection::from(*node), max_chars))
}

/// Containers from the first tier that yields any.
fn containers<'a>(doc: &'a Document, scope: Option<&Selection<'a>>) -> Vec<Selection<'a>> {
    let keep = |found: Vec<Selection<'a>>| -> Vec<Selection<'a>> {
        found.into_iter().filter(|el| !in_calendar_strip(el)).collect()
    };

    let tier = keep(
        scoped(doc, scope, "div")
            .into_iter()
            .filter(|el| utils::has_class(el, "liItem"))
            .collect(),
    );
    if !tier.is_empty() {
        tracing::debug!(tier = 1, containers = tier.len(), "fixture containers");
        return tier;
    }

    let tier = keep(
        scoped(doc, scope, "div, li")
            .into_iter()
            .filter(|el| utils::class_matches(el, &MATCH_ITEM_CLASS))
            .collect(),
    );
    if !tier.is_empty() {
        tracing::debug!(tier = 2, containers = tier.len(), "fixture containers");
        return tier;
    }

    let tier = keep(
        scoped(doc, scope, "a[href]")
            .into_iter()
            .filter(|el| el.attr("href").is_some_and(|href| MATCH_DETAIL_HREF.is_match(&href)))
            .collect(),
    );
    tracing::debug!(tier = 3, containers = tier.len(), "fixture containers");
    tier
}

/// Team name with embedded times and scores removed.
#[must_use]
pub fn clean_team_name(raw: &str) -> String {
    let without_time = EMBEDDED_TIME.replace_all(raw, "");
    EMBEDDED_SCORE.replace_all(without_time.trim(), "").trim().to_string()
}

fn match_time(container: &Selection) -> Option<String> {
    let time_el = container
        .select("span")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|el| utils::has_class(el, "time"))
        .or_else(|| dom::find_by_class(container, "*", &TIME_CLASS))?;

    short_text(&time_el, TIME_MAX_CHARS).filter(|text| text.contains(':'))
}

/// Home and away names from the `teamA`/`teamB` layout, or the first two
/// team-classed elements. A single distinct name comes back as home only.
fn teams(container: &Selection) -> (Option<String>, Option<String>) {
    let side = |class: &str| {
        container
            .select("div")
            .nodes()
            .iter()
            .map(|node| Selection::from(*node))
            .find(|el| utils::has_class(el, class))
    };

    if let (Some(team_a), Some(team_b)) = (side("teamA"), side("teamB")) {
        return (
            first_short_text(&team_a, "p", LABEL_MAX_CHARS),
            first_short_text(&team_b, "p", LABEL_MAX_CHARS),
        );
    }

    let mut names: Vec<String> = Vec::new();
    for team in dom::find_all_by_class(container, "*", &TEAM_CLASS).iter().take(2) {
        let label = team
            .select("p, span, h3")
            .nodes()
            .first()
            .map_or_else(|| team.clone(), |node| Selection::from(*node));
        let Some(raw) = short_text(&label, LABEL_MAX_CHARS) else {
            continue;
        };
        let name = clean_team_name(&raw);
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    let mut names = names.into_iter();
    (names.next(), names.next())
}

fn status(container: &Selection) -> Option<String> {
    let status_el = container
        .select("div")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|el| utils::has_class(el, "matchStatus"))?;
    first_short_text(&status_el, "span", STATUS_MAX_CHARS)
}

fn score(container: &Selection) -> Option<String> {
    let scores: Vec<String> = dom::elements_of(&container.select("span"))
        .iter()
        .filter(|el| utils::has_class(el, "score"))
        .map(dom::clean_text)
        .collect();
    match scores.as_slice() {
        [home, away, ..] if home != "-" && away != "-" => Some(format!("{home} - {away}")),
        _ => None,
    }
}

fn labelled_div(container: &Selection, class: &str) -> Option<String> {
    let el = dom::elements_of(&container.select("div"))
        .into_iter()
        .find(|el| utils::has_class(el, class))?;
    short_text(&el, LABEL_MAX_CHARS)
}

fn match_url(doc: &Document, container: &Selection) -> Option<String> {
    let href = if dom::tag_name(container).as_deref() == Some("a") {
        dom::attr(container, "href")
    } else {
        container
            .select("a[href]")
            .nodes()
            .first()
            .and_then(|node| dom::attr(&Selection::from(*node), "href"))
    }?;
    let resolved = doc.resolve(&href);
    resolved.contains("/match/").then_some(resolved)
}

fn competition(container: &Selection) -> Option<String> {
    let card = dom::find_ancestor(container, |el| utils::tokens_contain(&dom::class_tokens(el), "matchCard"))?;
    first_short_text(&card, "h2", LABEL_MAX_CHARS)
}

fn fixture_record(doc: &Document, container: &Selection) -> Option<ExtractedRecord> {
    let mut record = ExtractedRecord::new(doc.address().as_str());

    let time = match_time(container);
    let (home, away) = teams(container);

    match (&home, &away) {
        (Some(home), Some(away)) => {
            record.insert("home_team", home.as_str());
            record.insert("away_team", away.as_str());
        }
        (Some(team), None) | (None, Some(team)) => record.insert("team", team.as_str()),
        (None, None) => return None,
    }
    record.insert_opt("match_time", time);
    record.insert_opt("status", status(container));
    record.insert_opt("score", score(container));
    record.insert_opt("round", labelled_div(container, "date"));
    record.insert_opt("channel", labelled_div(container, "channel"));
    record.insert_opt("match_url", match_url(doc, container));
    record.insert_opt("competition", competition(container));

    Some(record)
}

/// Dedup key: home, away and kick-off time.
fn fixture_key(record: &ExtractedRecord) -> (String, String, String) {
    let field = |name: &str| record.text(name).unwrap_or_default().to_string();
    let home = record.text("home_team").or_else(|| record.text("team")).unwrap_or_default();
    (home.to_string(), field("away_team"), field("match_time"))
}

/// Fixture records, deduplicated, from at most
/// `options.max_fixture_containers` containers.
#[must_use]
pub fn extract<'a>(doc: &'a Document, scope: Option<&Selection<'a>>, options: &Options) -> Vec<ExtractedRecord> {
    let found = containers(doc, scope);
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut records: Vec<ExtractedRecord> = Vec::new();

    for (idx, container) in found.iter().take(options.max_fixture_containers).enumerate() {
        let Some(mut record) = fixture_record(doc, container) else {
            tracing::debug!(container = idx, "fixture skipped: no teams found");
            continue;
        };
        if !seen.insert(fixture_key(&record)) {
            tracing::debug!(container = idx, "fixture skipped: duplicate");
            continue;
        }
        record.insert("match_index", records.len());
        records.push(record);
    }

    tracing::debug!(containers = found.len(), records = records.len(), "fixture extraction");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str) -> Document {
        Document::parse("https://scores.test/fixtures", markup).unwrap_or_else(|e| panic!("{e}"))
    }

    fn li_item(home: &str, away: &str, time: &str) -> String {
        format!(
            r#"<div class="liItem">
                 <a href="/match/100/{home}">
                   <div class="teamA"><p>{home}</p></div>
                   <div class="MResult"><span class="score">2</span><span class="score">1</span><span class="time">{time}</span></div>
                   <div class="teamB"><p>{away}</p></div>
                 </a>
                 <div class="matchStatus"><span>Finished</span></div>
                 <div class="channel">beIN 1</div>
               </div>"#
        )
    }

    #[test]
    fn test_known_layout() {
        let markup = format!(
            r#"<div class="matchCard"><h2>Premier League</h2>{}</div>"#,
            li_item("Ahly", "Zamalek", "20:00")
        );
        let records = extract(&doc(&markup), None, &Options::default());

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.text("home_team"), Some("Ahly"));
        assert_eq!(r.text("away_team"), Some("Zamalek"));
        assert_eq!(r.text("match_time"), Some("20:00"));
        assert_eq!(r.text("score"), Some("2 - 1"));
        assert_eq!(r.text("status"), Some("Finished"));
        assert_eq!(r.text("channel"), Some("beIN 1"));
        assert_eq!(r.text("competition"), Some("Premier League"));
        assert_eq!(r.text("match_url"), Some("https://scores.test/match/100/Ahly"));
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let markup = [
            li_item("Ahly", "Zamalek", "20:00"),
            li_item("Ahly", "Zamalek", "20:00"),
            li_item("Ahly", "Zamalek", "22:00"),
        ]
        .concat();
        let records = extract(&doc(&markup), None, &Options::default());

        assert_eq!(records.len(), 2);
        let keys: HashSet<_> = records.iter().map(fixture_key).collect();
        assert_eq!(keys.len(), records.len());
    }

    #[test]
    fn test_generic_team_classes_are_cleaned() {
        let d = doc(r#"
            <li class="fixture">
              <span class="kickoff-time">18:30</span>
              <div class="team home"><span>Arsenal 2 - 1</span></div>
              <div class="team away"><span>Chelsea--18:30</span></div>
            </li>
        "#);
        let records = extract(&d, None, &Options::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("home_team"), Some("Arsenal"));
        assert_eq!(records[0].text("away_team"), Some("Chelsea"));
        assert_eq!(records[0].text("match_time"), Some("18:30"));
    }

    #[test]
    fn test_detail_link_tier_and_single_team() {
        let d = doc(r#"<a href="/match/77/"><span class="team-name">Lakers</span></a>"#);
        let records = extract(&d, None, &Options::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("team"), Some("Lakers"));
        assert_eq!(records[0].text("match_url"), Some("https://scores.test/match/77/"));
    }

    #[test]
    fn test_calendar_navigation_is_ignored() {
        let d = doc(r#"
            <nav><div class="calendar"><div class="liItem"><div class="team">X</div><div class="team">Y</div></div></div></nav>
            <p>No fixtures today</p>
        "#);
        assert!(extract(&d, None, &Options::default()).is_empty());
    }

    #[test]
    fn test_clean_team_name() {
        assert_eq!(clean_team_name("Ahly--20:00"), "Ahly");
        assert_eq!(clean_team_name("Zamalek 3 - 0"), "Zamalek");
        assert_eq!(clean_team_name("Real Madrid"), "Real Madrid");
    }
}
