//! Sliding-window strategy for free text
//!
//! Windows are measured in characters, not bytes, so multi-byte text never
//! splits inside a scalar. Consecutive windows overlap by `overlap`
//! characters so entities straddling a window boundary appear whole in at
//! least one chunk.

use crate::core::chunker::{ChunkIds, ChunkOptions};
use crate::domain::{Chunk, ContentShape};

/// Split text into overlapping fixed-size windows
///
/// The step between window starts is `max(1, chunk_size - overlap)`;
/// a misconfigured `overlap >= chunk_size` therefore degrades to
/// single-character steps instead of looping forever. Empty content yields
/// exactly one empty chunk at offset 0 so every job has at least one unit of
/// work.
pub(crate) fn chunk_text(
    content: &str,
    options: &ChunkOptions,
    shape: ContentShape,
    ids: &mut ChunkIds,
) -> Vec<Chunk> {
    let chars: Vec<char> = content.chars().collect();
    let size = options.chunk_size.max(1);
    let step = size.saturating_sub(options.overlap).max(1);

    if chars.is_empty() {
        return vec![Chunk::new(ids.next_id(), "", 0, shape)];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + size).min(chars.len());
        let text: String = chars[start..end].iter().collect();
        chunks.push(Chunk::new(ids.next_id(), text, start, shape));
        if end >= chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(chunk_size: usize, overlap: usize) -> ChunkOptions {
        ChunkOptions {
            chunk_size,
            overlap,
            ..ChunkOptions::default()
        }
    }

    fn chunk(content: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
        let mut ids = ChunkIds::default();
        chunk_text(
            content,
            &options(chunk_size, overlap),
            ContentShape::Unstructured,
            &mut ids,
        )
    }

    #[test]
    fn test_empty_content_single_empty_chunk() {
        let chunks = chunk("", 2000, 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "");
        assert_eq!(chunks[0].offset, 0);
    }

    #[test]
    fn test_short_content_single_chunk() {
        let chunks = chunk("hello world", 2000, 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "hello world");
    }

    #[test]
    fn test_windows_overlap_by_configured_amount() {
        let content = "abcdefghijklmnopqrstuvwxyz";
        let chunks = chunk(content, 10, 3);
        // step = 7: offsets 0, 7, 14, 21
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].text, "abcdefghij");
        assert_eq!(chunks[1].offset, 7);
        // consecutive windows share exactly `overlap` characters
        assert_eq!(&chunks[0].text[7..], &chunks[1].text[..3]);
        assert_eq!(chunks[3].text, "vwxyz");
    }

    #[test]
    fn test_coverage_is_exact() {
        let content: String = ('a'..='z').cycle().take(101).collect();
        let chunks = chunk(&content, 25, 5);
        // every character position is inside at least one window
        let mut covered = vec![false; 101];
        for c in &chunks {
            for i in c.offset..c.offset + c.text.chars().count() {
                covered[i] = true;
            }
        }
        assert!(covered.iter().all(|&seen| seen));
        // and the last window ends exactly at the content end
        let last = chunks.last().unwrap();
        assert_eq!(last.offset + last.text.chars().count(), 101);
    }

    #[test]
    fn test_overlap_at_least_chunk_size_still_terminates() {
        let chunks = chunk("abcdef", 3, 10);
        // degenerate step of 1: windows at offsets 0..=3
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].text, "abc");
        assert_eq!(chunks[3].text, "def");
    }

    #[test]
    fn test_zero_chunk_size_clamped() {
        let chunks = chunk("ab", 0, 0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "a");
        assert_eq!(chunks[1].text, "b");
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let content = "é".repeat(30);
        let chunks = chunk(&content, 10, 2);
        for c in &chunks {
            assert!(c.text.chars().count() <= 10);
        }
        assert_eq!(chunks[0].text.chars().count(), 10);
    }
}
