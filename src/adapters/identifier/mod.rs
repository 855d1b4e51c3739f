//! Entity identifier collaborator boundary
//!
//! The reasoning engine that actually recognizes sensitive entities lives
//! behind the [`EntityIdentifier`] trait. Implementations receive one chunk
//! plus the rendered policy text, may emit intermediate snapshots of the
//! entities recognized so far, and finish with the terminal entity list. Any
//! retry policy is the implementation's own business; the pipeline treats a
//! failure as fatal to the chunk that observed it.

pub mod http;

use crate::domain::{Chunk, IdentifierError, SensitiveEntity};
use async_trait::async_trait;
use tokio::sync::mpsc;

pub use http::{HttpEntityIdentifier, response_schema};

/// Channel on which an identifier publishes partial entity-list snapshots
///
/// Senders may outlive interest in the results: a send to a closed channel
/// means the caller has moved on, and implementations should drop the error
/// and keep working (or stop early, their choice).
pub type PartialSink = mpsc::UnboundedSender<Vec<SensitiveEntity>>;

/// External entity-recognition step guided by policy text
#[async_trait]
pub trait EntityIdentifier: Send + Sync {
    /// Recognize sensitive entities in one chunk
    ///
    /// The returned list is the terminal result; entities must already be
    /// shaped as the variant matching `chunk.shape`. Snapshots sent on
    /// `partials` are cumulative entities-so-far views, in order.
    async fn identify(
        &self,
        chunk: &Chunk,
        policy_text: &str,
        partials: PartialSink,
    ) -> Result<Vec<SensitiveEntity>, IdentifierError>;
}
