//! Policy-aware segmentation of normalized text.
//!
//! - log streams: fixed windows of lines
//! - everything else: boundary split, then bounded greedy buffering

pub mod boundaries;
pub mod buffer;
pub mod features;
pub mod log;
pub mod segmenter;

pub use buffer::BufferChunker;
pub use features::FeatureExtractor;
pub use segmenter::Segmenter;
