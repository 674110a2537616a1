//! Stage 1: sanitize raw text without touching its structure.

use ingest_core::{IngestAudit, Metadata, Normalize};
use serde_json::Value;

/// Strips null bytes and folds `\r\n` / `\r` into `\n`. Everything else,
/// including leading and trailing whitespace, is kept as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self { Self }
}

/// The cleanup itself, usable without an audit record.
pub fn normalize_text(text: &str) -> String {
    text.replace('\0', "").replace("\r\n", "\n").replace('\r', "\n")
}

impl Normalize for Normalizer {
    fn normalize(&self, text: &str, metadata: Option<&Metadata>) -> (String, IngestAudit) {
        let null_bytes = text.matches('\0').count();
        let normalized = normalize_text(text);

        tracing::debug!(
            original_len = text.len(),
            normalized_len = normalized.len(),
            null_bytes,
            "normalized input"
        );

        let audit = IngestAudit::new("normalize", "sanitize")
            .with("original_length", text.len())
            .with("normalized_length", normalized.len())
            .with("null_bytes_removed", null_bytes)
            .with("metadata", metadata.cloned().map(Value::Object).unwrap_or(Value::Null));
        (normalized, audit)
    }
}
