//! Kanban card metadata: `@{YYYY-MM-DD}` due dates, #tags, [[wikilinks]]

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Due date token as written by the Kanban plugin
    static ref DUE_DATE_PATTERN: Regex = Regex::new(r"@\{(\d{4}-\d{2}-\d{2})\}").unwrap();
    /// #tag or #parent/child
    static ref TAG_PATTERN: Regex = Regex::new(r"#([a-zA-Z0-9_/-]+)").unwrap();
    /// [[target]] or [[target|alias]]
    static ref CARD_WIKILINK_PATTERN: Regex =
        Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap();
}

/// Metadata pulled out of a card's text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardMetadata {
    /// Text with due-date tokens removed and whitespace trimmed.
    /// Tags and wikilinks stay in the text.
    pub text: String,
    /// First due date, `None` when absent or not a real calendar date
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub wikilinks: Vec<String>,
}

/// Parse metadata from raw card text (everything after the checkbox)
pub fn parse_card_metadata(raw: &str) -> CardMetadata {
    let due_date = DUE_DATE_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok());

    if due_date.is_none() && DUE_DATE_PATTERN.is_match(raw) {
        log::debug!("Ignoring invalid due date in card: {}", raw);
    }

    let tags = TAG_PATTERN
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();

    let wikilinks = CARD_WIKILINK_PATTERN
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|target| !target.is_empty())
        .collect();

    let text = DUE_DATE_PATTERN.replace_all(raw, "").trim().to_string();

    CardMetadata {
        text,
        due_date,
        tags,
        wikilinks,
    }
}

/// Render a due date the way the Kanban plugin writes it
pub fn format_due_date(date: NaiveDate) -> String {
    format!("@{{{}}}", date.format("%Y-%m-%d"))
}

/// Parse a user-supplied `YYYY-MM-DD` date
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
