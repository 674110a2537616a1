//! Pipeline configuration. Every threshold is a named default that callers may
//! override; the defaults are the tuned values the classification contract
//! is tested against.

use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_STEP_PATTERN: &str = r"\n\s*(Step|Krok|Kolejno)\s*\d+[:.]";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub detector: DetectorConfig,
    pub policy: PolicyConfig,
    pub segmenter: SegmenterConfig,
    pub compressor: CompressorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Log mode needs strictly more non-blank lines than this.
    pub log_min_lines: usize,
    pub log_time_ratio: f64,
    pub list_ratio: f64,
    pub table_ratio: f64,
    /// Technical mode needs more identifiers than `line_count * fraction`.
    pub identifier_line_fraction: f64,
    pub conflict_entropy: f64,
    pub repeat_prefix_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub log_repeatability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    pub log_window_lines: usize,
    pub procedure_max_size: usize,
    pub default_max_size: usize,
    pub mixed_max_size: usize,
    /// A piece longer than `max_size * hard_limit_factor` is split on its own.
    pub hard_limit_factor: usize,
    pub step_pattern: String,
    pub extraction_rules: Vec<ExtractionRule>,
}

/// Regex feature extraction: capture group index -> metadata key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRule {
    pub name: String,
    pub pattern: String,
    pub mapping: BTreeMap<usize, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorConfig {
    pub pattern_prefix_chars: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            log_min_lines: 5,
            log_time_ratio: 0.4,
            list_ratio: 0.3,
            table_ratio: 0.4,
            identifier_line_fraction: 0.5,
            conflict_entropy: 8.0,
            repeat_prefix_chars: 10,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self { log_repeatability: 0.4 }
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            log_window_lines: 50,
            procedure_max_size: 1500,
            default_max_size: 1000,
            mixed_max_size: 800,
            hard_limit_factor: 3,
            step_pattern: DEFAULT_STEP_PATTERN.into(),
            extraction_rules: Vec::new(),
        }
    }
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self { pattern_prefix_chars: 40 }
    }
}

impl IngestConfig {
    /// Parse a JSON document; absent keys keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let d = &self.detector;
        for (name, value) in [
            ("detector.log_time_ratio", d.log_time_ratio),
            ("detector.list_ratio", d.list_ratio),
            ("detector.table_ratio", d.table_ratio),
            ("detector.identifier_line_fraction", d.identifier_line_fraction),
            ("detector.conflict_entropy", d.conflict_entropy),
            ("policy.log_repeatability", self.policy.log_repeatability),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(IngestError::Configuration(format!("{name} must be a finite, non-negative number")));
            }
        }

        let s = &self.segmenter;
        for (name, value) in [
            ("detector.repeat_prefix_chars", d.repeat_prefix_chars),
            ("segmenter.log_window_lines", s.log_window_lines),
            ("segmenter.procedure_max_size", s.procedure_max_size),
            ("segmenter.default_max_size", s.default_max_size),
            ("segmenter.mixed_max_size", s.mixed_max_size),
            ("segmenter.hard_limit_factor", s.hard_limit_factor),
            ("compressor.pattern_prefix_chars", self.compressor.pattern_prefix_chars),
        ] {
            if value == 0 {
                return Err(IngestError::Configuration(format!("{name} must be greater than zero")));
            }
        }

        if s.step_pattern.is_empty() {
            return Err(IngestError::Configuration("segmenter.step_pattern must not be empty".into()));
        }
        Ok(())
    }
}
