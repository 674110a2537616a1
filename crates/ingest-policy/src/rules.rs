//! Dominance chain. Evaluated top to bottom, first match wins. Do not turn
//! this into a score: reordering the guards changes which policy fires.

use ingest_core::{ContentSignature, Policy, PolicyConfig, StructuralMode};
use serde::{Deserialize, Serialize};

/// Which guard in the chain produced the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Conflict,
    LogRepeatable,
    Telemetry,
    LogNotRepeatable,
    Procedure,
    Technical,
    Table,
    Fallback,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::LogRepeatable => "log_repeatable",
            Self::Telemetry => "telemetry",
            Self::LogNotRepeatable => "log_not_repeatable",
            Self::Procedure => "procedure",
            Self::Technical => "technical",
            Self::Table => "table",
            Self::Fallback => "fallback",
        }
    }
}

/// Policy plus the guard that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub policy: Policy,
    pub rule: Rule,
}

/// Total over every signature.
pub fn select_by_rules(sig: &ContentSignature, config: &PolicyConfig) -> Selection {
    let pick = |policy, rule| Selection { policy, rule };
    let mode = sig.mode();

    if sig.stab.conflict {
        return pick(Policy::MixedSafe, Rule::Conflict);
    }

    if matches!(mode, StructuralMode::LinearLogLike | StructuralMode::MachineTelemetryLike) {
        if sig.dist.repeatability_score > config.log_repeatability {
            return pick(Policy::LogStream, Rule::LogRepeatable);
        }
        if mode == StructuralMode::MachineTelemetryLike {
            return pick(Policy::LogStream, Rule::Telemetry);
        }
        return pick(Policy::MixedSafe, Rule::LogNotRepeatable);
    }

    match mode {
        StructuralMode::ListProcedureLike => pick(Policy::ProcedureDoc, Rule::Procedure),
        StructuralMode::TechnicalSpecLike => pick(Policy::TechnicalFormal, Rule::Technical),
        StructuralMode::TableRecordLike => pick(Policy::DataTable, Rule::Table),
        _ => pick(Policy::ProseText, Rule::Fallback),
    }
}
