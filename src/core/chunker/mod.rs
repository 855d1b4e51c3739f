//! Content chunking engine
//!
//! Splits job content into bounded, reconstructable units according to its
//! [`ContentShape`]. Three strategies exist:
//!
//! - [`unstructured`]: overlapping sliding window over the character sequence
//! - [`columnar`]: column-group partitioning of CSV/spreadsheet tables
//! - [`structured`]: recursive descent over parsed JSON
//!
//! Chunking is pure and deterministic: the same shape, content, and options
//! always produce the same chunk sequence. Parse failures in the columnar and
//! structured strategies degrade to the unstructured strategy over the raw
//! content; they are never surfaced as errors. Fallback chunks keep the
//! requested shape so downstream shape-keyed stages stay consistent.

pub mod columnar;
pub mod structured;
pub mod unstructured;

use crate::domain::{Chunk, ContentShape};

/// Tunables for the chunking strategies
///
/// Degenerate values are tolerated rather than rejected: `chunk_size` is
/// clamped to at least 1 and an `overlap >= chunk_size` degrades to
/// single-character stepping, so chunking always terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Target chunk size in characters (unstructured and structured strategies)
    pub chunk_size: usize,
    /// Characters shared between consecutive unstructured chunks
    pub overlap: usize,
    /// Columns per chunk for the columnar strategy
    pub column_chunk_size: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            chunk_size: 2000,
            overlap: 200,
            column_chunk_size: 4,
        }
    }
}

/// Monotonic chunk-id source, scoped to one `create_chunks` invocation
///
/// Ids are opaque to callers; the only guarantee is uniqueness within the
/// invocation, which a plain counter gives deterministically.
#[derive(Debug, Default)]
pub(crate) struct ChunkIds {
    next: usize,
}

impl ChunkIds {
    pub(crate) fn next_id(&mut self) -> String {
        let id = format!("chunk-{}", self.next);
        self.next += 1;
        id
    }
}

/// Split content into an ordered chunk sequence for the given shape
///
/// # Examples
///
/// ```
/// use sentra::core::chunker::{create_chunks, ChunkOptions};
/// use sentra::domain::ContentShape;
///
/// let chunks = create_chunks(ContentShape::Unstructured, "hello", &ChunkOptions::default());
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].text, "hello");
/// assert_eq!(chunks[0].offset, 0);
/// ```
pub fn create_chunks(shape: ContentShape, content: &str, options: &ChunkOptions) -> Vec<Chunk> {
    let mut ids = ChunkIds::default();
    let chunks = match shape {
        ContentShape::Unstructured => {
            unstructured::chunk_text(content, options, shape, &mut ids)
        }
        ContentShape::Csv | ContentShape::Spreadsheet => {
            columnar::chunk_table(content, options, shape, &mut ids)
        }
        ContentShape::Json => structured::chunk_document(content, options, shape, &mut ids),
    };

    tracing::debug!(
        shape = %shape,
        content_chars = content.chars().count(),
        chunks = chunks.len(),
        "Chunked content"
    );

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique_within_invocation() {
        let mut ids = ChunkIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_dispatch_is_deterministic() {
        let options = ChunkOptions {
            chunk_size: 10,
            overlap: 3,
            column_chunk_size: 2,
        };
        let first = create_chunks(ContentShape::Unstructured, "abcdefghijklmnop", &options);
        let second = create_chunks(ContentShape::Unstructured, "abcdefghijklmnop", &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_chunks_keep_requested_shape() {
        // Not valid JSON, so the structured strategy degrades to the sliding
        // window, but the chunk stays tagged as JSON content.
        let chunks = create_chunks(ContentShape::Json, "not json at all", &ChunkOptions::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].shape, ContentShape::Json);
    }
}
