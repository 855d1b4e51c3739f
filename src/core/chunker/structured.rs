//! Recursive-descent strategy for JSON documents
//!
//! The document is split along its own structure: array elements are emitted
//! individually, objects that serialize within the chunk budget stay whole,
//! and oversized objects are expanded property by property. Each chunk's
//! text carries the path of the fragment it holds (`"users[2].email": ...`),
//! which is what the identifier uses to produce structural locators.

use crate::core::chunker::{unstructured, ChunkIds, ChunkOptions};
use crate::domain::{Chunk, ContentShape};
use serde_json::Value;

/// Split a JSON document into path-tagged fragment chunks
///
/// Content that fails to parse as JSON degrades to the sliding window over
/// the raw text. The chunk offset is the fragment's ordinal position in
/// emission order.
pub(crate) fn chunk_document(
    content: &str,
    options: &ChunkOptions,
    shape: ContentShape,
    ids: &mut ChunkIds,
) -> Vec<Chunk> {
    let root: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(shape = %shape, error = %err, "Content is not JSON, degrading to sliding window");
            return unstructured::chunk_text(content, options, shape, ids);
        }
    };

    let mut chunks = Vec::new();
    descend(&root, "", options.chunk_size.max(1), shape, ids, &mut chunks);
    chunks
}

fn descend(
    value: &Value,
    path: &str,
    chunk_size: usize,
    shape: ContentShape,
    ids: &mut ChunkIds,
    out: &mut Vec<Chunk>,
) {
    match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                descend(item, &item_path, chunk_size, shape, ids, out);
            }
        }
        Value::Object(map) => {
            let serialized = value.to_string();
            if serialized.chars().count() <= chunk_size {
                emit(path, &serialized, shape, ids, out);
            } else {
                for (key, child) in map {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    descend(child, &child_path, chunk_size, shape, ids, out);
                }
            }
        }
        primitive => {
            emit(path, &primitive.to_string(), shape, ids, out);
        }
    }
}

/// Emit one fragment chunk, prefixing non-root fragments with their path
fn emit(path: &str, serialized: &str, shape: ContentShape, ids: &mut ChunkIds, out: &mut Vec<Chunk>) {
    let text = if path.is_empty() {
        serialized.to_string()
    } else {
        format!("\"{path}\": {serialized}")
    };
    let offset = out.len();
    out.push(Chunk::new(ids.next_id(), text, offset, shape));
}
