//! Bounded greedy buffering of pieces into chunks.

use ingest_core::IngestChunk;
use std::ops::Range;

/// Accumulates consecutive pieces while the covered span stays within
/// `max_size` characters. Chunk content is the contiguous source slice from
/// the first to the last buffered piece.
#[derive(Debug, Clone)]
pub struct BufferChunker {
    pub max_size: usize,
    pub hard_limit: usize,
    pub unit_type: &'static str,
}

#[derive(Debug, Clone)]
struct Pending {
    span: Range<usize>,
    chars: usize,
    pieces: usize,
}

impl BufferChunker {
    pub fn new(max_size: usize, hard_limit_factor: usize, unit_type: &'static str) -> Self {
        Self {
            max_size: max_size.max(1),
            hard_limit: max_size.max(1).saturating_mul(hard_limit_factor.max(1)),
            unit_type,
        }
    }

    pub fn chunk(&self, text: &str, pieces: &[Range<usize>]) -> Vec<IngestChunk> {
        let mut chunks = Vec::new();
        let mut pending: Option<Pending> = None;

        for piece in pieces {
            let piece_chars = text[piece.clone()].chars().count();

            if piece_chars > self.hard_limit {
                if let Some(p) = pending.take() {
                    chunks.push(self.emit(text, p));
                }
                self.split_oversized(text, piece.clone(), &mut chunks);
                continue;
            }

            pending = match pending.take() {
                None => Some(Pending { span: piece.clone(), chars: piece_chars, pieces: 1 }),
                Some(p) => {
                    let gap = text[p.span.end..piece.start].chars().count();
                    let grown = p.chars + gap + piece_chars;
                    if grown > self.max_size {
                        chunks.push(self.emit(text, p));
                        Some(Pending { span: piece.clone(), chars: piece_chars, pieces: 1 })
                    } else {
                        Some(Pending { span: p.span.start..piece.end, chars: grown, pieces: p.pieces + 1 })
                    }
                }
            };
        }
        if let Some(p) = pending {
            chunks.push(self.emit(text, p));
        }
        chunks
    }

    fn emit(&self, text: &str, p: Pending) -> IngestChunk {
        IngestChunk::new(&text[p.span.clone()], p.span.start)
            .with_meta("type", self.unit_type)
            .with_meta("atomic_count", p.pieces)
    }

    /// Consecutive `max_size`-character windows over one piece.
    fn split_oversized(&self, text: &str, piece: Range<usize>, out: &mut Vec<IngestChunk>) {
        let body = &text[piece.clone()];
        let mut start = 0;
        let mut count = 0;
        for (idx, _) in body.char_indices() {
            if count == self.max_size {
                out.push(self.oversized(body, start..idx, piece.start));
                start = idx;
                count = 0;
            }
            count += 1;
        }
        if start < body.len() {
            out.push(self.oversized(body, start..body.len(), piece.start));
        }
    }

    fn oversized(&self, body: &str, range: Range<usize>, base: usize) -> IngestChunk {
        IngestChunk::new(&body[range.clone()], base + range.start)
            .with_meta("type", self.unit_type)
            .with_meta("atomic_count", 1usize)
            .with_meta("oversized_atom", true)
    }
}
