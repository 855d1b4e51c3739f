//! Column-group strategy for CSV and spreadsheet exports
//!
//! Tabular content is partitioned by column rather than by row: entities in
//! a column (an email column, a card-number column) stay together with their
//! header, which is what the identifier needs to classify them. The parser
//! is a small RFC-4180-style state machine; no example in the wild is strict
//! about trailing newlines or ragged rows, so neither is this one.

use crate::core::chunker::{unstructured, ChunkIds, ChunkOptions};
use crate::domain::{Chunk, ContentShape};

/// Split tabular content into column-group chunks
///
/// The first parsed row is the header. When there is no header row, or every
/// header field is blank, the content does not behave like a table and the
/// strategy degrades to the sliding window over the raw content. Otherwise
/// columns are grouped by `column_chunk_size`, and each chunk re-serializes
/// the header slice plus each data row's matching slice as CSV. The chunk
/// offset is the starting column index of the group.
pub(crate) fn chunk_table(
    content: &str,
    options: &ChunkOptions,
    shape: ContentShape,
    ids: &mut ChunkIds,
) -> Vec<Chunk> {
    let rows = parse_csv(content);

    let header_present = rows
        .first()
        .map(|header| header.iter().any(|field| !field.trim().is_empty()))
        .unwrap_or(false);
    if !header_present {
        tracing::debug!(shape = %shape, "No usable header row, degrading to sliding window");
        return unstructured::chunk_text(content, options, shape, ids);
    }

    let header = &rows[0];
    let data = &rows[1..];
    let group_size = options.column_chunk_size.max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < header.len() {
        let end = (start + group_size).min(header.len());

        let mut lines = Vec::with_capacity(data.len() + 1);
        lines.push(serialize_row(&slice_columns(header, start, end)));
        for row in data {
            lines.push(serialize_row(&slice_columns(row, start, end)));
        }

        chunks.push(Chunk::new(ids.next_id(), lines.join("\n"), start, shape));
        start = end;
    }

    chunks
}

/// Column slice of a possibly ragged row, padding missing cells with ""
fn slice_columns(row: &[String], start: usize, end: usize) -> Vec<&str> {
    (start..end)
        .map(|index| row.get(index).map(String::as_str).unwrap_or(""))
        .collect()
}

/// Parse CSV text into rows of fields
///
/// Handles quoted fields containing commas and newlines, doubled-quote
/// escapes, and normalizes CRLF line endings. A trailing newline does not
/// produce an empty final row.
pub(crate) fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Serialize one row of fields as a CSV line
///
/// Fields containing a comma, quote, or line break are quoted, with embedded
/// quotes doubled, so the output re-parses to the same field values.
pub(crate) fn serialize_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| quote_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str, column_chunk_size: usize) -> Vec<Chunk> {
        let mut ids = ChunkIds::default();
        let options = ChunkOptions {
            column_chunk_size,
            ..ChunkOptions::default()
        };
        chunk_table(content, &options, ContentShape::Csv, &mut ids)
    }

    #[test]
    fn test_parse_plain_rows() {
        let rows = parse_csv("a,b,c\n1,2,3\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_parse_quoted_comma_and_newline() {
        let rows = parse_csv("name,note\n\"Doe, Jane\",\"line1\nline2\"\n");
        assert_eq!(rows[1][0], "Doe, Jane");
        assert_eq!(rows[1][1], "line1\nline2");
    }

    #[test]
    fn test_parse_doubled_quotes() {
        let rows = parse_csv("\"say \"\"hi\"\"\"");
        assert_eq!(rows[0][0], "say \"hi\"");
    }

    #[test]
    fn test_parse_normalizes_crlf() {
        let rows = parse_csv("a,b\r\n1,2\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["1", "2"]);
    }

    #[test]
    fn test_round_trip_awkward_fields() {
        let fields = ["plain", "has,comma", "has \"quote\"", "has\nnewline"];
        let line = serialize_row(&fields);
        let reparsed = parse_csv(&line);
        assert_eq!(reparsed.len(), 1);
        assert_eq!(reparsed[0], fields);
    }

    #[test]
    fn test_column_groups_partition_header() {
        let chunks = chunk("c1,c2,c3,c4\nv1,v2,v3,v4\n", 2);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].offset, 0);
        assert_eq!(chunks[1].offset, 2);

        let headers: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.text.lines().next().unwrap().split(','))
            .collect();
        assert_eq!(headers, vec!["c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn test_column_group_keeps_rows_aligned() {
        let chunks = chunk("email,name\na@x.com,Ann\nb@y.org,Bob\n", 1);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "email\na@x.com\nb@y.org");
        assert_eq!(chunks[1].text, "name\nAnn\nBob");
    }

    #[test]
    fn test_ragged_rows_padded() {
        let chunks = chunk("a,b,c\n1\n", 3);
        assert_eq!(chunks[0].text.lines().nth(1).unwrap(), "1,,");
    }

    #[test]
    fn test_blank_header_falls_back_to_window() {
        let chunks = chunk(",,\nvalue,value,value\n", 2);
        // fallback produces character-window chunks, still tagged CSV
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].shape, ContentShape::Csv);
        assert!(chunks[0].text.contains("value"));
    }

    #[test]
    fn test_empty_content_falls_back_to_window() {
        let chunks = chunk("", 4);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "");
    }
}
