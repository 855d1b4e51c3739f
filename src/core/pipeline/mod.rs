//! Scan pipeline orchestration.
//!
//! Composes the chunker, the external entity identifier, the validator, and
//! the deduplicator into a single bounded-concurrency run per job.
//!
//! # Modules
//!
//! - [`orchestrator`] - the [`ScanPipeline`] state machine
//! - [`events`] - streaming [`StreamEvent`] types published during a run
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sentra::adapters::identifier::HttpEntityIdentifier;
//! use sentra::adapters::policy::BlockPolicyFormatter;
//! use sentra::core::pipeline::{PipelineConfig, ScanPipeline};
//! use sentra::domain::{ContentShape, PolicyRef, ProcessingJob};
//!
//! # async fn example(identifier: HttpEntityIdentifier) -> sentra::domain::Result<()> {
//! let pipeline = ScanPipeline::new(
//!     Arc::new(identifier),
//!     Arc::new(BlockPolicyFormatter),
//!     PipelineConfig::default(),
//! );
//!
//! let job = ProcessingJob::new(
//!     "Contact jane@example.com",
//!     ContentShape::Unstructured,
//!     vec![PolicyRef::new("pol-1", "Contact data")],
//! );
//!
//! let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();
//! let result = pipeline.execute(&job, events_tx).await?;
//! println!("{} findings", result.entities.len());
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod orchestrator;

pub use events::StreamEvent;
pub use orchestrator::{PipelineConfig, ScanPipeline};
