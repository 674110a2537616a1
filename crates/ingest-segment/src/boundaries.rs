//! Piece boundaries. A piece is a byte range of the source text; the
//! whitespace between pieces is boundary whitespace and belongs to no piece.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static RE_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").unwrap());

/// Separator spans for runs of blank lines.
pub fn blank_line_spans(text: &str) -> Vec<Range<usize>> {
    RE_BLANK_LINES.find_iter(text).map(|m| m.range()).collect()
}

/// Cut spans for a marker pattern. Only the leading whitespace of each match
/// is consumed; the marker text opens the next piece.
pub fn marker_spans(text: &str, marker: &Regex) -> Vec<Range<usize>> {
    marker.find_iter(text)
        .map(|m| {
            let s = m.as_str();
            let lead = s.len() - s.trim_start().len();
            m.start()..m.start() + lead
        })
        .collect()
}

/// Pieces left between the (possibly overlapping) separator spans,
/// skipping whitespace-only pieces.
pub fn pieces(text: &str, mut spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
    spans.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }

    let mut out = Vec::with_capacity(merged.len() + 1);
    let mut cursor = 0;
    for sep in merged.iter().chain(std::iter::once(&(text.len()..text.len()))) {
        let piece = cursor..sep.start;
        if !text[piece.clone()].trim().is_empty() {
            out.push(piece);
        }
        cursor = sep.end;
    }
    out
}

/// Paragraph pieces.
pub fn paragraphs(text: &str) -> Vec<Range<usize>> {
    pieces(text, blank_line_spans(text))
}

/// Paragraph pieces further cut in front of every marker match.
pub fn marked_paragraphs(text: &str, marker: &Regex) -> Vec<Range<usize>> {
    let mut spans = blank_line_spans(text);
    spans.extend(marker_spans(text, marker));
    pieces(text, spans)
}
