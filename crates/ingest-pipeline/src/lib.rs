//! Content-adaptive ingestion: runs the five stages end to end.
//!
//! Stages:
//! 1. Normalize (null bytes, line endings)
//! 2. Detect the content signature
//! 3. Select a policy by dominance rules
//! 4. Segment by policy
//! 5. Compress (log streams only) with provenance

pub mod pipeline;

pub use ingest_core::{
    ContentSignature, IngestAudit, IngestChunk, IngestConfig, IngestError, Metadata, Policy, Result,
    StructuralMode,
};
pub use pipeline::{IngestOutcome, IngestPipeline, INGEST_VERSION};
