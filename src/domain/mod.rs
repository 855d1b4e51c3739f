//! Domain models and types for Sentra.
//!
//! This module contains the core data model shared by the chunker, validator,
//! deduplicator, and pipeline:
//!
//! - **Content classification** ([`ContentShape`])
//! - **Chunk model** ([`Chunk`])
//! - **Findings** ([`SensitiveEntity`], [`EntityDetails`])
//! - **Job input/output** ([`ProcessingJob`], [`PipelineResult`], [`AnalysisStats`])
//! - **Error types** ([`SentraError`], [`IdentifierError`]) and the [`Result`] alias
//!
//! The entity model is a closed tagged union keyed on content shape, so
//! identity-key extraction and shape matching are exhaustive matches rather
//! than field probing:
//!
//! ```
//! use sentra::domain::{ContentShape, EntityDetails, SensitiveEntity};
//!
//! let finding = SensitiveEntity::Unstructured {
//!     details: EntityDetails {
//!         label: "Email address".to_string(),
//!         policy_reference: "pol-1".to_string(),
//!         confidence: 9.0,
//!         severity_hex: "D9534F".to_string(),
//!         category: "contact".to_string(),
//!     },
//!     excerpt: "jane@example.com".to_string(),
//! };
//! assert_eq!(finding.shape(), ContentShape::Unstructured);
//! ```

pub mod chunk;
pub mod content;
pub mod entity;
pub mod errors;
pub mod job;
pub mod policy;
pub mod result;

// Re-export commonly used types for convenience
pub use chunk::Chunk;
pub use content::ContentShape;
pub use entity::{EntityDetails, SensitiveEntity};
pub use errors::{IdentifierError, SentraError};
pub use job::{AnalysisStats, PipelineResult, ProcessingJob};
pub use policy::PolicyRef;
pub use result::Result;
