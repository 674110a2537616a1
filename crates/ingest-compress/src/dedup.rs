//! Stage 5: first-line pattern dedup.

use ingest_core::{
    CompressionOutcome, Compress, CompressorConfig, IngestAudit, IngestChunk, Policy, Provenance,
};
use std::collections::HashMap;

/// Chunks sharing one pattern. `indices[0]` is the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGroup {
    pub pattern: String,
    pub indices: Vec<usize>,
}

/// First line of a chunk, truncated to `prefix_chars` characters.
pub fn pattern_of(chunk: &IngestChunk, prefix_chars: usize) -> String {
    chunk.first_line().chars().take(prefix_chars).collect()
}

/// Group chunk indices by pattern, in order of first appearance.
pub fn find_pattern_groups(chunks: &[IngestChunk], prefix_chars: usize) -> Vec<PatternGroup> {
    let mut slot: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<PatternGroup> = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let pattern = pattern_of(chunk, prefix_chars);
        match slot.get(&pattern) {
            Some(&g) => groups[g].indices.push(i),
            None => {
                slot.insert(pattern.clone(), groups.len());
                groups.push(PatternGroup { pattern, indices: vec![i] });
            }
        }
    }
    groups
}

#[derive(Debug, Clone, Default)]
pub struct Compressor {
    pub config: CompressorConfig,
}

impl Compressor {
    pub fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    fn passthrough(chunks: Vec<IngestChunk>, policy: Policy) -> CompressionOutcome {
        let count = chunks.len();
        let audit = IngestAudit::new("compress", "passthrough")
            .with("reason", "policy_not_eligible")
            .with("policy", policy.as_str())
            .with("original_count", count)
            .with("compressed_count", count)
            .with("ratio", 1.0);
        CompressionOutcome { retained: (0..count).collect(), chunks, provenance: Provenance::new(), audit }
    }
}

impl Compress for Compressor {
    fn compress(&self, chunks: Vec<IngestChunk>, policy: Policy) -> CompressionOutcome {
        if policy != Policy::LogStream {
            return Self::passthrough(chunks, policy);
        }

        let original = chunks.len();
        let groups = find_pattern_groups(&chunks, self.config.pattern_prefix_chars);
        let mut keep = vec![false; original];
        let mut provenance = Provenance::new();
        for g in &groups {
            keep[g.indices[0]] = true;
            if g.indices.len() > 1 {
                provenance.insert(g.indices[0], g.indices.clone());
            }
        }

        let (retained, kept): (Vec<usize>, Vec<IngestChunk>) = chunks.into_iter()
            .enumerate()
            .filter(|(i, _)| keep[*i])
            .unzip();

        let compressed = kept.len();
        let ratio = if original == 0 { 1.0 } else { compressed as f64 / original as f64 };
        tracing::debug!(original, compressed, ratio, merged_roots = provenance.len(), "chunks deduplicated");

        let audit = IngestAudit::new("compress", "pattern_dedup")
            .with("policy", policy.as_str())
            .with("original_count", original)
            .with("compressed_count", compressed)
            .with("ratio", ratio)
            .with("merged_roots", provenance.len());
        CompressionOutcome { chunks: kept, provenance, retained, audit }
    }
}
