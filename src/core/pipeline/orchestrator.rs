//! Scan pipeline orchestrator
//!
//! One [`ScanPipeline`] instance composes the chunker, the external entity
//! identifier, the validator, and the deduplicator into a single run:
//!
//! 1. Validate the job input (fail fast, before any chunk work)
//! 2. Chunk the content once
//! 3. Fan chunk tasks out onto a bounded worker pool
//! 4. Per task: identify, forward partial snapshots, validate locally
//! 5. Join all tasks, deduplicate the union, emit the terminal event
//!
//! Any single chunk failure is fatal to the whole job: findings from a scan
//! are consumed as one atomic unit of truth, so there are no partial
//! results. Each run emits exactly one terminal event, `complete` or
//! `error`.

use crate::adapters::identifier::EntityIdentifier;
use crate::adapters::policy::PolicyFormatter;
use crate::core::chunker::{create_chunks, ChunkOptions};
use crate::core::dedup::{remove_duplicates, DedupConfig};
use crate::core::pipeline::events::StreamEvent;
use crate::core::validate::{validate_entities, ValidationConfig};
use crate::domain::{
    AnalysisStats, Chunk, PipelineResult, PolicyRef, ProcessingJob, Result, SensitiveEntity,
    SentraError,
};
use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Pipeline tunables, fixed for the lifetime of one instance
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum chunk tasks in flight at once
    pub concurrency: usize,
    pub chunking: ChunkOptions,
    pub validation: ValidationConfig,
    pub dedup: DedupConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            chunking: ChunkOptions::default(),
            validation: ValidationConfig::default(),
            dedup: DedupConfig::default(),
        }
    }
}

/// Orchestrates scan jobs against an entity identifier
///
/// Holds no state across runs other than the policy-text cache, which is
/// scoped to this instance and discarded with it. The instance is cheap to
/// share across tasks behind an `Arc`.
pub struct ScanPipeline {
    identifier: Arc<dyn EntityIdentifier>,
    formatter: Arc<dyn PolicyFormatter>,
    config: PipelineConfig,
    /// Rendered policy text keyed on the order-independent policy-id set
    policy_cache: Mutex<HashMap<String, Arc<str>>>,
}

impl ScanPipeline {
    pub fn new(
        identifier: Arc<dyn EntityIdentifier>,
        formatter: Arc<dyn PolicyFormatter>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            identifier,
            formatter,
            config,
            policy_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Run one scan job to its single terminal outcome
    ///
    /// Progress is published on `events`: zero or more `thinking` events
    /// while chunks are in flight, then exactly one `complete` or `error`.
    /// A dropped receiver stops event forwarding but does not fail the job.
    ///
    /// # Errors
    ///
    /// Returns [`SentraError::InvalidJob`] for malformed input (before any
    /// chunk work) and [`SentraError::ChunkTask`] when any chunk's identify
    /// path fails; the same failure is mirrored as the terminal `error`
    /// event.
    pub async fn execute(
        &self,
        job: &ProcessingJob,
        events: mpsc::UnboundedSender<StreamEvent>,
    ) -> Result<PipelineResult> {
        match self.run(job, &events).await {
            Ok(result) => {
                let _ = events.send(StreamEvent::Complete {
                    entities: result.entities.clone(),
                    stats: result.stats.clone(),
                });
                Ok(result)
            }
            Err(err) => {
                tracing::error!(error = %err, "Scan failed");
                let _ = events.send(StreamEvent::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        job: &ProcessingJob,
        events: &mpsc::UnboundedSender<StreamEvent>,
    ) -> Result<PipelineResult> {
        let started = Instant::now();
        let job_id = Uuid::new_v4();

        validate_job(job)?;

        let chunks = create_chunks(job.shape, &job.content, &self.config.chunking);
        tracing::info!(
            job_id = %job_id,
            shape = %job.shape,
            chunks = chunks.len(),
            policies = job.policies.len(),
            "Starting scan"
        );

        let policy_text = self.policy_text(&job.policies);
        let entities_found = AtomicUsize::new(0);
        let entities_validated = AtomicUsize::new(0);

        let per_chunk: Vec<Vec<SensitiveEntity>> = stream::iter(chunks.iter().cloned().enumerate())
            .map(|(index, chunk)| {
                let events = events.clone();
                let policy_text = Arc::clone(&policy_text);
                let found = &entities_found;
                let validated = &entities_validated;
                async move {
                    self.process_chunk(index, chunk, policy_text, events, found, validated)
                        .await
                }
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .try_collect()
            .await?;

        let union: Vec<SensitiveEntity> = per_chunk.into_iter().flatten().collect();
        let entities = remove_duplicates(union, job.shape, &self.config.dedup);

        let stats = AnalysisStats {
            chunks_generated: chunks.len(),
            entities_found: entities_found.load(Ordering::Relaxed),
            entities_validated: entities_validated.load(Ordering::Relaxed),
            entities_deduplicated: entities.len(),
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!(
            job_id = %job_id,
            found = stats.entities_found,
            validated = stats.entities_validated,
            deduplicated = stats.entities_deduplicated,
            duration_ms = stats.processing_time_ms,
            "Scan complete"
        );

        Ok(PipelineResult {
            entities,
            chunks,
            stats,
        })
    }

    /// Run one chunk through identify and validation
    ///
    /// Partial snapshots from the identifier are forwarded as `thinking`
    /// events tagged with this chunk's id; the forwarder is joined before
    /// returning so a chunk's thinking events always precede its
    /// contribution to the terminal event.
    async fn process_chunk(
        &self,
        index: usize,
        chunk: Chunk,
        policy_text: Arc<str>,
        events: mpsc::UnboundedSender<StreamEvent>,
        found: &AtomicUsize,
        validated: &AtomicUsize,
    ) -> Result<Vec<SensitiveEntity>> {
        let (partial_tx, mut partial_rx) = mpsc::unbounded_channel::<Vec<SensitiveEntity>>();

        let chunk_id = chunk.id.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(snapshot) = partial_rx.recv().await {
                let event = StreamEvent::Thinking {
                    chunk_id: chunk_id.clone(),
                    entities: snapshot,
                    timestamp: Utc::now(),
                };
                if events.send(event).is_err() {
                    // Receiver disconnected: drain remaining snapshots so the
                    // identifier never blocks on a dead stream.
                    while partial_rx.recv().await.is_some() {}
                    break;
                }
            }
        });

        let outcome = self
            .identifier
            .identify(&chunk, &policy_text, partial_tx)
            .await;
        let _ = forwarder.await;

        let raw = outcome.map_err(|source| SentraError::ChunkTask { index, source })?;
        found.fetch_add(raw.len(), Ordering::Relaxed);

        let kept = validate_entities(raw, &self.config.validation);
        validated.fetch_add(kept.len(), Ordering::Relaxed);

        tracing::debug!(chunk = %chunk.id, kept = kept.len(), "Chunk processed");
        Ok(kept)
    }

    /// Rendered policy text for a policy set, cached per pipeline instance
    ///
    /// The cache key is order-independent over policy ids, so jobs that list
    /// the same policies in a different order share one rendering.
    fn policy_text(&self, policies: &[PolicyRef]) -> Arc<str> {
        let key = policy_set_key(policies);

        let mut cache = self
            .policy_cache
            .lock()
            .expect("policy cache lock poisoned");
        if let Some(text) = cache.get(&key) {
            return Arc::clone(text);
        }

        let rendered: Arc<str> = Arc::from(self.formatter.format(policies));
        cache.insert(key, Arc::clone(&rendered));
        rendered
    }
}

/// SHA-256 over the sorted, deduplicated policy-id set
fn policy_set_key(policies: &[PolicyRef]) -> String {
    let mut ids: Vec<&str> = policies.iter().map(|policy| policy.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();

    let mut hasher = Sha256::new();
    for id in ids {
        hasher.update(id.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

/// Fail-fast job validation, run before any chunk work begins
fn validate_job(job: &ProcessingJob) -> Result<()> {
    if job.content.is_empty() {
        return Err(SentraError::InvalidJob("content is empty".to_string()));
    }
    if job.policies.is_empty() {
        return Err(SentraError::InvalidJob(
            "at least one policy is required".to_string(),
        ));
    }
    for (index, policy) in job.policies.iter().enumerate() {
        if !policy.is_well_formed() {
            return Err(SentraError::InvalidJob(format!(
                "policy at index {index} has an empty id or name"
            )));
        }
    }
    Ok(())
}
