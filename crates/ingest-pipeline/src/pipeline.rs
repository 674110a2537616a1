//! Ingest pipeline: runs the stages in order and decorates the survivors.

use ingest_compress::Compressor;
use ingest_core::{
    Compress, CompressionOutcome, ContentSignature, DetectSignature, IngestAudit, IngestChunk, IngestConfig, IngestError,
    Metadata, Normalize, Policy, Result, Segment, SelectPolicy,
};
use ingest_detect::{Normalizer, SignatureDetector};
use ingest_policy::PolicySelector;
use ingest_segment::Segmenter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output schema version attached to every chunk.
pub const INGEST_VERSION: &str = "1.0.0";

/// Result of one ingest call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestOutcome {
    pub chunks: Vec<IngestChunk>,
    pub signature: ContentSignature,
    pub policy: Policy,
    pub audit_trail: Vec<IngestAudit>,
}

impl IngestOutcome {
    pub fn stages(&self) -> Vec<&str> {
        self.audit_trail.iter().map(|a| a.stage.as_str()).collect()
    }

    pub fn audit(&self, stage: &str) -> Option<&IngestAudit> {
        self.audit_trail.iter().find(|a| a.stage == stage)
    }
}

/// The pipeline. Holds only immutable configuration, so one instance can
/// serve any number of callers concurrently.
pub struct IngestPipeline<
    N = Normalizer,
    D = SignatureDetector,
    P = PolicySelector,
    S = Segmenter,
    C = Compressor,
> {
    normalizer: N,
    detector: D,
    selector: P,
    segmenter: S,
    compressor: C,
}

impl IngestPipeline {
    /// Validate the config and build the built-in stages.
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_stages(
            Normalizer::new(),
            SignatureDetector::new(config.detector),
            PolicySelector::new(config.policy),
            Segmenter::new(config.segmenter)?,
            Compressor::new(config.compressor),
        ))
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(IngestConfig::default())
    }
}

impl<N, D, P, S, C> IngestPipeline<N, D, P, S, C>
where
    N: Normalize,
    D: DetectSignature,
    P: SelectPolicy,
    S: Segment,
    C: Compress,
{
    pub fn from_stages(normalizer: N, detector: D, selector: P, segmenter: S, compressor: C) -> Self {
        Self { normalizer, detector, selector, segmenter, compressor }
    }

    /// Run all stages over `text`. Never fails: degenerate input yields
    /// empty results, not errors.
    pub fn ingest(&self, text: &str, metadata: Option<&Metadata>) -> IngestOutcome {
        let mut audit_trail = Vec::with_capacity(5);

        let (normalized, audit) = self.normalizer.normalize(text, metadata);
        audit_trail.push(audit);

        let (signature, audit) = self.detector.detect(&normalized);
        audit_trail.push(audit);

        let (policy, audit) = self.selector.select(&signature);
        audit_trail.push(audit);

        let (chunks, audit) = self.segmenter.segment(&normalized, policy, &signature);
        audit_trail.push(audit);
        let segmented = chunks.len();

        let CompressionOutcome { chunks, provenance, retained, audit } = self.compressor.compress(chunks, policy);
        audit_trail.push(audit);

        if retained.len() != chunks.len() {
            tracing::warn!(
                chunks = chunks.len(),
                retained = retained.len(),
                "compressor index list does not match its chunks"
            );
        }

        let signature_meta = signature.to_metadata();
        let chunks: Vec<IngestChunk> = chunks.into_iter()
            .enumerate()
            .map(|(pos, mut chunk)| {
                let index = retained.get(pos).copied().unwrap_or(pos);
                let merged = provenance.get(&index).cloned().unwrap_or_else(|| vec![index]);
                chunk.metadata.insert("signature".into(), signature_meta.clone());
                chunk.metadata.insert("policy".into(), Value::from(policy.as_str()));
                chunk.metadata.insert("ingest_version".into(), Value::from(INGEST_VERSION));
                chunk.metadata.insert("compression_provenance".into(), Value::from(merged));
                chunk
            })
            .collect();

        tracing::info!(
            mode = signature.mode().as_str(),
            policy = policy.as_str(),
            input_len = text.len(),
            segmented,
            chunks = chunks.len(),
            "ingest complete"
        );

        IngestOutcome { chunks, signature, policy, audit_trail }
    }

    /// Byte-boundary entry point: rejects input that is not UTF-8 text
    /// before any stage runs.
    pub fn ingest_bytes(&self, bytes: &[u8], metadata: Option<&Metadata>) -> Result<IngestOutcome> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            tracing::warn!(len = bytes.len(), error = %e, "rejected non-text input");
            IngestError::InvalidInput(format!("input is not valid UTF-8: {e}"))
        })?;
        Ok(self.ingest(text, metadata))
    }
}
