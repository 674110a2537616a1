//! Stage 2: three-layer content signature.

use crate::distribution::{repeatability, token_entropy, vocab_size};
use crate::markers::{self, MarkerCounts};
use ingest_core::{
    ContentSignature, DetectSignature, DetectorConfig, DistributionLayer, IngestAudit, StabilityLayer,
    StructuralLayer, StructuralMode,
};

/// Computes a [`ContentSignature`] from normalized text.
#[derive(Debug, Clone, Default)]
pub struct SignatureDetector {
    pub config: DetectorConfig,
}

impl SignatureDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Dominance chain over marker ratios. First match wins; the order is
    /// part of the contract.
    pub fn classify(&self, line_count: usize, m: &MarkerCounts) -> StructuralMode {
        let c = &self.config;
        if line_count == 0 {
            return StructuralMode::Empty;
        }
        let lc = line_count as f64;

        if line_count > c.log_min_lines && m.time as f64 / lc > c.log_time_ratio {
            StructuralMode::LinearLogLike
        } else if m.list as f64 / lc > c.list_ratio {
            StructuralMode::ListProcedureLike
        } else if m.table as f64 / lc > c.table_ratio {
            StructuralMode::TableRecordLike
        } else if m.identifiers as f64 > lc * c.identifier_line_fraction {
            StructuralMode::TechnicalSpecLike
        } else {
            StructuralMode::ProseParagraphLike
        }
    }

    fn structural(&self, text: &str, lines: &[&str]) -> StructuralLayer {
        let markers = markers::scan(text, lines);
        let mode = self.classify(lines.len(), &markers);

        let (mut total, mut digits, mut upper, mut special) = (0usize, 0usize, 0usize, 0usize);
        for ch in text.chars() {
            total += 1;
            if ch.is_ascii_digit() {
                digits += 1;
            } else if ch.is_uppercase() {
                upper += 1;
            } else if !ch.is_alphanumeric() && !ch.is_whitespace() {
                special += 1;
            }
        }
        let ratio = |n: usize| if total == 0 { 0.0 } else { n as f64 / total as f64 };
        let line_chars: usize = lines.iter().map(|l| l.chars().count()).sum();

        StructuralLayer {
            mode,
            line_count: lines.len(),
            avg_line_len: line_chars as f64 / lines.len() as f64,
            digit_ratio: ratio(digits),
            special_ratio: ratio(special),
            upper_ratio: ratio(upper),
            time_markers: markers.time,
            list_markers: markers.list,
            table_markers: markers.table,
            identifiers: markers.identifiers,
        }
    }

    fn distribution(&self, text: &str, lines: &[&str]) -> DistributionLayer {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        DistributionLayer {
            token_entropy: token_entropy(&tokens),
            repeatability_score: repeatability(lines, self.config.repeat_prefix_chars),
            vocab_size: vocab_size(&tokens),
        }
    }

    fn stability(&self, mode: StructuralMode, dist: &DistributionLayer) -> StabilityLayer {
        StabilityLayer {
            conflict: mode == StructuralMode::LinearLogLike && dist.token_entropy > self.config.conflict_entropy,
            order_sensitive: mode.is_order_sensitive(),
        }
    }
}

impl DetectSignature for SignatureDetector {
    fn detect(&self, text: &str) -> (ContentSignature, IngestAudit) {
        let lines: Vec<&str> = text.split('\n').filter(|l| !l.trim().is_empty()).collect();

        let signature = if lines.is_empty() {
            ContentSignature::empty()
        } else {
            let structure = self.structural(text, &lines);
            let dist = self.distribution(text, &lines);
            let stab = self.stability(structure.mode, &dist);
            ContentSignature { structure, dist, stab }
        };

        tracing::debug!(
            mode = signature.mode().as_str(),
            lines = signature.structure.line_count,
            entropy = signature.dist.token_entropy,
            repeatability = signature.dist.repeatability_score,
            conflict = signature.stab.conflict,
            "signature detected"
        );

        let audit = IngestAudit::new("detect", "signature_computed")
            .with("mode", signature.mode().as_str())
            .with("short_circuit", lines.is_empty())
            .with("signature", signature.to_metadata());
        (signature, audit)
    }
}
