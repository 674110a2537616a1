//! Fixed windows of lines for log streams.

use ingest_core::IngestChunk;

/// Byte span of every line, newline excluded.
fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for line in text.split('\n') {
        spans.push((start, start + line.len()));
        start += line.len() + 1;
    }
    spans
}

/// Sequential, non-overlapping windows of `window` lines. Each chunk opens
/// at the window's first non-blank line; windows that hold only whitespace
/// produce no chunk but still advance the offset.
pub fn window_lines(text: &str, window: usize) -> Vec<IngestChunk> {
    if text.is_empty() { return Vec::new(); }
    let spans = line_spans(text);
    let mut chunks = Vec::new();

    for group in spans.chunks(window.max(1)) {
        let Some(lead) = group.iter().position(|&(s, e)| !text[s..e].trim().is_empty()) else {
            continue;
        };
        let lines = &group[lead..];
        let (start, end) = (lines[0].0, lines[lines.len() - 1].1);

        let sequence = chunks.len();
        chunks.push(
            IngestChunk::new(&text[start..end], start)
                .with_meta("type", "log_window")
                .with_meta("log_sequence", sequence)
                .with_meta("line_count", lines.len()),
        );
    }
    chunks
}
