//! Token and line-prefix statistics.

use std::collections::{BTreeMap, HashMap};

/// Shannon entropy (bits) of the token frequency distribution.
/// Counts are kept ordered so the float sum is reproducible.
pub fn token_entropy(tokens: &[&str]) -> f64 {
    if tokens.is_empty() { return 0.0; }
    let mut freq: BTreeMap<&str, usize> = BTreeMap::new();
    for t in tokens {
        *freq.entry(*t).or_insert(0) += 1;
    }
    let total = tokens.len() as f64;
    freq.values()
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

pub fn vocab_size(tokens: &[&str]) -> usize {
    let mut seen: Vec<&str> = tokens.to_vec();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Fraction of lines longer than `prefix_chars` whose first `prefix_chars`
/// characters occur on at least one other such line.
pub fn repeatability(lines: &[&str], prefix_chars: usize) -> f64 {
    let prefixes: Vec<String> = lines.iter()
        .filter(|l| l.chars().count() > prefix_chars)
        .map(|l| l.chars().take(prefix_chars).collect())
        .collect();
    if prefixes.is_empty() { return 0.0; }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for p in &prefixes {
        *counts.entry(p.as_str()).or_insert(0) += 1;
    }
    let repeated = prefixes.iter().filter(|p| counts[p.as_str()] > 1).count();
    repeated as f64 / prefixes.len() as f64
}
