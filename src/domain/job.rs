//! Scan job input and pipeline output types

use crate::domain::chunk::Chunk;
use crate::domain::content::ContentShape;
use crate::domain::entity::SensitiveEntity;
use crate::domain::policy::PolicyRef;
use serde::{Deserialize, Serialize};

/// Immutable input to one pipeline run
///
/// A job is created per request and never mutated; every run produces
/// exactly one terminal outcome for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingJob {
    /// Raw content to scan
    pub content: String,
    /// Structural shape of the content
    pub shape: ContentShape,
    /// Policies guiding the identifier (must be non-empty)
    pub policies: Vec<PolicyRef>,
}

impl ProcessingJob {
    pub fn new(content: impl Into<String>, shape: ContentShape, policies: Vec<PolicyRef>) -> Self {
        Self {
            content: content.into(),
            shape,
            policies,
        }
    }
}

/// Aggregate statistics for one completed pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Chunks produced by the chunker
    #[serde(rename = "chunksGenerated")]
    pub chunks_generated: usize,
    /// Entities returned by the identifier across all chunks, pre-validation
    #[serde(rename = "entitiesFound")]
    pub entities_found: usize,
    /// Entities surviving validation
    #[serde(rename = "entitiesValidated")]
    pub entities_validated: usize,
    /// Entities remaining after deduplication
    #[serde(rename = "entitiesDeduplicated")]
    pub entities_deduplicated: usize,
    /// Wall-clock duration of the run in milliseconds
    #[serde(rename = "processingTimeMs")]
    pub processing_time_ms: u64,
}

/// Final output of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Deduplicated findings in first-seen identity order
    pub entities: Vec<SensitiveEntity>,
    /// The chunk sequence the run was fanned out over
    pub chunks: Vec<Chunk>,
    /// Aggregate counters and timing
    pub stats: AnalysisStats,
}
