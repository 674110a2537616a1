//! Regex feature extraction into chunk metadata.

use ingest_core::{ExtractionRule, IngestChunk, IngestError, Metadata, Result};
use regex::Regex;
use serde_json::{Number, Value};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
struct CompiledRule {
    pattern: Regex,
    mapping: BTreeMap<usize, String>,
}

/// Compiled extraction rules. Rules run in configuration order; a later
/// match for the same key overwrites an earlier one.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    rules: Vec<CompiledRule>,
}

impl FeatureExtractor {
    pub fn new(rules: &[ExtractionRule]) -> Result<Self> {
        let rules = rules.iter()
            .map(|r| {
                let pattern = Regex::new(&r.pattern)
                    .map_err(|source| IngestError::Pattern { name: r.name.clone(), source })?;
                Ok(CompiledRule { pattern, mapping: r.mapping.clone() })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn extract(&self, content: &str) -> Metadata {
        let mut features = Metadata::new();
        for rule in &self.rules {
            for caps in rule.pattern.captures_iter(content) {
                for (group, key) in &rule.mapping {
                    if let Some(m) = caps.get(*group) {
                        features.insert(key.clone(), typed_value(m.as_str()));
                    }
                }
            }
        }
        features
    }

    /// Attach `extracted_features` to every chunk that matched; returns the
    /// distinct keys seen.
    pub fn apply(&self, chunks: &mut [IngestChunk]) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        if self.is_empty() { return keys; }
        for chunk in chunks.iter_mut() {
            let features = self.extract(&chunk.content);
            if features.is_empty() { continue; }
            keys.extend(features.keys().cloned());
            chunk.metadata.insert("extracted_features".into(), Value::Object(features));
        }
        keys
    }
}

/// Integers and floats become JSON numbers, anything else stays a string.
fn typed_value(raw: &str) -> Value {
    if raw.contains('.') {
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    } else if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    Value::String(raw.to_string())
}
