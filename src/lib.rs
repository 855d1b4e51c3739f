// Sentra - Policy-Guided Sensitive Data Scanner
// Copyright (c) 2025 Sentra Contributors
// Licensed under the MIT License

//! # Sentra - Sensitive Data Discovery Pipeline
//!
//! Sentra partitions arbitrary content (free text, CSV, JSON, spreadsheet
//! exports) into bounded chunks, routes each chunk through an external
//! entity-identification service guided by policy text, and reconciles the
//! results into a deduplicated set of sensitive-data findings with aggregate
//! statistics.
//!
//! ## Architecture
//!
//! Sentra follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (chunking, validation, deduplication, pipeline)
//! - [`adapters`] - External collaborators (identifier service, policy formatting)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sentra::adapters::identifier::HttpEntityIdentifier;
//! use sentra::adapters::policy::BlockPolicyFormatter;
//! use sentra::config::load_config;
//! use sentra::core::pipeline::ScanPipeline;
//! use sentra::domain::{ContentShape, ProcessingJob};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("sentra.toml")?;
//!
//!     // Assemble the pipeline against the configured identifier service
//!     let pipeline = ScanPipeline::new(
//!         Arc::new(HttpEntityIdentifier::new(&config.identifier)?),
//!         Arc::new(BlockPolicyFormatter),
//!         config.scan.to_pipeline_config(),
//!     );
//!
//!     // Run one scan
//!     let job = ProcessingJob::new(
//!         "Reach me at jane@example.com",
//!         ContentShape::Unstructured,
//!         config.policies.clone(),
//!     );
//!     let (events, _receiver) = tokio::sync::mpsc::unbounded_channel();
//!     let result = pipeline.execute(&job, events).await?;
//!
//!     println!("Found {} sensitive entities", result.entities.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! A pipeline run publishes progress on a caller-supplied channel: any
//! number of `thinking` events carrying per-chunk partial results, then
//! exactly one terminal `complete` or `error` event. See
//! [`core::pipeline::StreamEvent`].
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with
//! [`domain::SentraError`]; identifier transport failures are mapped to
//! [`domain::IdentifierError`] and never leak third-party types.
//!
//! ## Logging
//!
//! Sentra uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! tracing::info!(shape = "csv", chunks = 12, "Starting scan");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
