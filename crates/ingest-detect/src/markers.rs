//! Marker scans used by the structural layer. Patterns compile once per process.

use regex::Regex;
use std::sync::LazyLock;

static RE_TIME: LazyLock<Regex> = LazyLock::new(|| Regex::new(
    r"\b\d{4}[-/.]\d{2}[-/.]\d{2}(?:[T ]\d{2}:\d{2}(?::\d{2})?)?|\b\d{1,2}:\d{2}:\d{2}\b"
).unwrap());
static RE_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(
    r"(?im)^[ \t]*(?:(?:step|krok|kolejno)[ \t]*\d+[:.)]|\d+[.)][ \t]|[-*+\x{2022}][ \t])"
).unwrap());
static RE_IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(
    r"\b[A-Z][A-Z0-9]*(?:[_-][A-Z0-9]+)+\b"
).unwrap());
static RE_TABLE_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w {3,}\w").unwrap());

/// Marker counts over a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCounts {
    pub time: usize,
    pub list: usize,
    pub table: usize,
    pub identifiers: usize,
}

/// Date/time-like substrings.
pub fn count_time_markers(text: &str) -> usize {
    RE_TIME.find_iter(text).count()
}

/// Lines opening with a step, numbered or bulleted prefix.
pub fn count_list_markers(text: &str) -> usize {
    RE_LIST.find_iter(text).count()
}

/// ALLCAPS tokens joined by `_` or `-`, e.g. `REQ-001`, `MAX_SIZE`.
pub fn count_identifiers(text: &str) -> usize {
    RE_IDENT.find_iter(text).count()
}

/// Lines holding a pipe, or a 3+ space gap between two word runs.
pub fn count_table_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> usize {
    lines.into_iter()
        .filter(|l| l.contains('|') || RE_TABLE_GAP.is_match(l))
        .count()
}

pub fn scan(text: &str, lines: &[&str]) -> MarkerCounts {
    MarkerCounts {
        time: count_time_markers(text),
        list: count_list_markers(text),
        table: count_table_lines(lines.iter().copied()),
        identifiers: count_identifiers(text),
    }
}
