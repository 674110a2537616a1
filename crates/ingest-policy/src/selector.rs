//! Stage 3 wrapper: rules plus audit record.

use crate::rules::select_by_rules;
use ingest_core::{ContentSignature, IngestAudit, Policy, PolicyConfig, SelectPolicy};

#[derive(Debug, Clone, Default)]
pub struct PolicySelector {
    pub config: PolicyConfig,
}

impl PolicySelector {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }
}

impl SelectPolicy for PolicySelector {
    fn select(&self, signature: &ContentSignature) -> (Policy, IngestAudit) {
        let selection = select_by_rules(signature, &self.config);
        tracing::debug!(
            policy = selection.policy.as_str(),
            rule = selection.rule.as_str(),
            mode = signature.mode().as_str(),
            "policy selected"
        );

        let audit = IngestAudit::new("policy", "dominance_selection")
            .with("policy", selection.policy.as_str())
            .with("rule", selection.rule.as_str())
            .with("mode", signature.mode().as_str())
            .with("conflict", signature.stab.conflict)
            .with("repeatability_score", signature.dist.repeatability_score);
        (selection.policy, audit)
    }
}
