//! Pattern dedup for log-stream chunks, with provenance of merged duplicates.

pub mod dedup;

pub use dedup::{find_pattern_groups, pattern_of, Compressor, PatternGroup};
