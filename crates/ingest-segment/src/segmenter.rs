//! Stage 4: choose a splitting strategy per policy.

use crate::boundaries;
use crate::buffer::BufferChunker;
use crate::features::FeatureExtractor;
use crate::log::window_lines;
use ingest_core::{
    ContentSignature, IngestAudit, IngestChunk, IngestError, Policy, Result, Segment, SegmenterConfig,
};
use regex::Regex;
use serde_json::Value;

/// Policy-specific segmenter. Patterns are compiled once in [`Segmenter::new`].
#[derive(Debug, Clone)]
pub struct Segmenter {
    pub config: SegmenterConfig,
    step_marker: Regex,
    features: FeatureExtractor,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        let step_marker = Regex::new(&config.step_pattern)
            .map_err(|source| IngestError::Pattern { name: "step_pattern".into(), source })?;
        let features = FeatureExtractor::new(&config.extraction_rules)?;
        Ok(Self { config, step_marker, features })
    }

    /// Character bound and chunk type used by the buffering policies.
    pub fn buffer_params(&self, policy: Policy) -> (usize, &'static str) {
        let c = &self.config;
        match policy {
            Policy::ProcedureDoc => (c.procedure_max_size, "procedural_step"),
            Policy::MixedSafe => (c.mixed_max_size, "mixed_safe_block"),
            Policy::TechnicalFormal => (c.default_max_size, "technical_block"),
            Policy::DataTable => (c.default_max_size, "table_block"),
            Policy::ProseText | Policy::LogStream => (c.default_max_size, "prose_block"),
        }
    }

    fn buffered(&self, text: &str, policy: Policy) -> Vec<IngestChunk> {
        let (max_size, unit_type) = self.buffer_params(policy);
        let pieces = match policy {
            Policy::ProcedureDoc => boundaries::marked_paragraphs(text, &self.step_marker),
            _ => boundaries::paragraphs(text),
        };
        BufferChunker::new(max_size, self.config.hard_limit_factor, unit_type).chunk(text, &pieces)
    }
}

impl Segment for Segmenter {
    fn segment(
        &self,
        text: &str,
        policy: Policy,
        signature: &ContentSignature,
    ) -> (Vec<IngestChunk>, IngestAudit) {
        let (mut chunks, strategy, bound) = match policy {
            Policy::LogStream => {
                let window = self.config.log_window_lines;
                (window_lines(text, window), "log_windowing", window)
            }
            _ => {
                let (max_size, _) = self.buffer_params(policy);
                (self.buffered(text, policy), "boundary_buffering", max_size)
            }
        };
        let extracted_keys = self.features.apply(&mut chunks);
        let oversized = chunks.iter().filter(|c| c.metadata.contains_key("oversized_atom")).count();

        tracing::debug!(
            policy = policy.as_str(),
            strategy,
            chunks = chunks.len(),
            oversized,
            "text segmented"
        );

        let audit = IngestAudit::new("segment", strategy)
            .with("policy", policy.as_str())
            .with("mode", signature.mode().as_str())
            .with("chunk_count", chunks.len())
            .with("bound", bound)
            .with("oversized_pieces", oversized)
            .with("extracted_keys", extracted_keys.into_iter().map(Value::String).collect::<Vec<_>>());
        (chunks, audit)
    }
}
