//! Stage seams. Each stage is a pure function of its input plus the
//! configuration it was built with.

use crate::types::{CompressionOutcome, ContentSignature, IngestAudit, IngestChunk, Metadata, Policy};

/// Stage 1: byte and line-ending cleanup.
pub trait Normalize: Send + Sync {
    fn normalize(&self, text: &str, metadata: Option<&Metadata>) -> (String, IngestAudit);
}

/// Stage 2: statistical fingerprint of normalized text.
pub trait DetectSignature: Send + Sync {
    fn detect(&self, text: &str) -> (ContentSignature, IngestAudit);
}

/// Stage 3: signature to policy. Must be total.
pub trait SelectPolicy: Send + Sync {
    fn select(&self, signature: &ContentSignature) -> (Policy, IngestAudit);
}

/// Stage 4: policy-specific chunking.
pub trait Segment: Send + Sync {
    fn segment(
        &self,
        text: &str,
        policy: Policy,
        signature: &ContentSignature,
    ) -> (Vec<IngestChunk>, IngestAudit);
}

/// Stage 5: duplicate removal with provenance.
pub trait Compress: Send + Sync {
    fn compress(&self, chunks: Vec<IngestChunk>, policy: Policy) -> CompressionOutcome;
}
