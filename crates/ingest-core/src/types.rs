use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Free-form key/value map attached to chunks, audits and ingest calls.
pub type Metadata = serde_json::Map<String, Value>;

/// Root chunk index -> every pre-compression index merged into it (root first).
pub type Provenance = BTreeMap<usize, Vec<usize>>;

/// Structural classification of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructuralMode {
    Empty,
    LinearLogLike,
    MachineTelemetryLike,
    ListProcedureLike,
    TableRecordLike,
    TechnicalSpecLike,
    ProseParagraphLike,
}

impl StructuralMode {
    pub const ALL: [StructuralMode; 7] = [
        Self::Empty,
        Self::LinearLogLike,
        Self::MachineTelemetryLike,
        Self::ListProcedureLike,
        Self::TableRecordLike,
        Self::TechnicalSpecLike,
        Self::ProseParagraphLike,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::LinearLogLike => "LINEAR_LOG_LIKE",
            Self::MachineTelemetryLike => "MACHINE_TELEMETRY_LIKE",
            Self::ListProcedureLike => "LIST_PROCEDURE_LIKE",
            Self::TableRecordLike => "TABLE_RECORD_LIKE",
            Self::TechnicalSpecLike => "TECHNICAL_SPEC_LIKE",
            Self::ProseParagraphLike => "PROSE_PARAGRAPH_LIKE",
        }
    }

    /// Modes where chunk order carries meaning.
    pub fn is_order_sensitive(&self) -> bool {
        matches!(self, Self::LinearLogLike | Self::ListProcedureLike)
    }
}

/// Handling policy chosen for one ingest call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Policy {
    LogStream,
    MixedSafe,
    ProcedureDoc,
    TechnicalFormal,
    DataTable,
    ProseText,
}

impl Policy {
    pub const ALL: [Policy; 6] = [
        Self::LogStream,
        Self::MixedSafe,
        Self::ProcedureDoc,
        Self::TechnicalFormal,
        Self::DataTable,
        Self::ProseText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogStream => "LOG_STREAM",
            Self::MixedSafe => "MIXED_SAFE",
            Self::ProcedureDoc => "PROCEDURE_DOC",
            Self::TechnicalFormal => "TECHNICAL_FORMAL",
            Self::DataTable => "DATA_TABLE",
            Self::ProseText => "PROSE_TEXT",
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural layer: line shape, character ratios, marker counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralLayer {
    pub mode: StructuralMode,
    pub line_count: usize,
    pub avg_line_len: f64,
    pub digit_ratio: f64,
    pub special_ratio: f64,
    pub upper_ratio: f64,
    pub time_markers: usize,
    pub list_markers: usize,
    pub table_markers: usize,
    pub identifiers: usize,
}

impl StructuralLayer {
    pub fn empty() -> Self {
        Self {
            mode: StructuralMode::Empty,
            line_count: 0,
            avg_line_len: 0.0,
            digit_ratio: 0.0,
            special_ratio: 0.0,
            upper_ratio: 0.0,
            time_markers: 0,
            list_markers: 0,
            table_markers: 0,
            identifiers: 0,
        }
    }
}

/// Distributional layer: token statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionLayer {
    pub token_entropy: f64,
    pub repeatability_score: f64,
    pub vocab_size: usize,
}

/// Stability layer: derived trust flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityLayer {
    pub conflict: bool,
    pub order_sensitive: bool,
}

/// Three-layer statistical fingerprint of a normalized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSignature {
    #[serde(rename = "struct")]
    pub structure: StructuralLayer,
    pub dist: DistributionLayer,
    pub stab: StabilityLayer,
}

impl ContentSignature {
    pub fn empty() -> Self {
        Self {
            structure: StructuralLayer::empty(),
            dist: DistributionLayer::default(),
            stab: StabilityLayer::default(),
        }
    }

    pub fn mode(&self) -> StructuralMode {
        self.structure.mode
    }

    /// Nested metadata form attached to every chunk; the same shape as the
    /// serde encoding.
    pub fn to_metadata(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A bounded, contiguous segment of the normalized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestChunk {
    pub content: String,
    pub metadata: Metadata,
    /// Byte offset into the normalized text.
    pub offset: usize,
    /// Byte length of `content`.
    pub length: usize,
}

impl IngestChunk {
    pub fn new(content: impl Into<String>, offset: usize) -> Self {
        let content = content.into();
        let length = content.len();
        Self { content, metadata: Metadata::new(), offset, length }
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn first_line(&self) -> &str {
        self.content.split('\n').next().unwrap_or("")
    }
}

/// One stage's record in the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestAudit {
    pub stage: String,
    pub action: String,
    pub trace: Metadata,
}

impl IngestAudit {
    pub fn new(stage: &str, action: &str) -> Self {
        Self { stage: stage.into(), action: action.into(), trace: Metadata::new() }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.trace.insert(key.to_string(), value.into());
        self
    }
}

/// Compressor output.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionOutcome {
    pub chunks: Vec<IngestChunk>,
    pub provenance: Provenance,
    /// Pre-compression index of each surviving chunk, in output order.
    pub retained: Vec<usize>,
    pub audit: IngestAudit,
}

impl CompressionOutcome {
    /// Provenance list for the survivor that had pre-compression index `index`.
    pub fn provenance_of(&self, index: usize) -> Vec<usize> {
        self.provenance.get(&index).cloned().unwrap_or_else(|| vec![index])
    }
}
