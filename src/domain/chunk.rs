//! Chunk value type
//!
//! A chunk is a bounded unit of content produced by the chunker and consumed
//! by the entity identifier. Chunks are immutable once created.

use crate::domain::content::ContentShape;
use serde::{Deserialize, Serialize};

/// A bounded slice of job content, tagged with its position and shape
///
/// The meaning of `offset` depends on the shape:
/// - `Unstructured`: character offset into the original content
/// - `Csv` / `Spreadsheet`: zero-based starting column index of the column
///   group contained in this chunk
/// - `Json`: ordinal position of the chunk in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Opaque identifier, unique within one chunker invocation
    pub id: String,
    /// The chunk text handed to the identifier
    pub text: String,
    /// Positional offset (see type-level docs for per-shape semantics)
    pub offset: usize,
    /// Shape of the job this chunk was derived from
    pub shape: ContentShape,
}

impl Chunk {
    pub fn new(id: impl Into<String>, text: impl Into<String>, offset: usize, shape: ContentShape) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            offset,
            shape,
        }
    }

    /// Length of the chunk text in characters (not bytes)
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_length_counts_scalars() {
        let chunk = Chunk::new("chunk-0", "café", 0, ContentShape::Unstructured);
        assert_eq!(chunk.len_chars(), 4);
        assert!(chunk.text.len() > 4); // UTF-8 bytes
    }

    #[test]
    fn test_serde_shape_tag() {
        let chunk = Chunk::new("chunk-3", "a,b", 4, ContentShape::Csv);
        let value = serde_json::to_value(&chunk).unwrap();
        assert_eq!(value["shape"], "csv");
        assert_eq!(value["offset"], 4);
    }
}
