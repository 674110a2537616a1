//! Shared data model, stage traits and configuration for the adaptive
//! ingestion pipeline.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{
    CompressorConfig, DetectorConfig, ExtractionRule, IngestConfig, PolicyConfig, SegmenterConfig,
};
pub use error::{IngestError, Result};
pub use traits::{Compress, DetectSignature, Normalize, Segment, SelectPolicy};
pub use types::*;
