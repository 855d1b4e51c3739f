//! Streaming events emitted during a scan
//!
//! A pipeline run publishes progress on a caller-supplied channel: any
//! number of `thinking` events while chunks are in flight, then exactly one
//! terminal event — `complete` or `error`, never both.

use crate::domain::{AnalysisStats, SensitiveEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event published on a scan's stream
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Intermediate entities-so-far snapshot for one chunk
    ///
    /// Events from different chunks may interleave; consumers must key on
    /// `chunk_id` rather than assuming ordering across chunks.
    Thinking {
        #[serde(rename = "chunkId")]
        chunk_id: String,
        entities: Vec<SensitiveEntity>,
        timestamp: DateTime<Utc>,
    },
    /// Terminal success: the final deduplicated findings and run counters
    Complete {
        entities: Vec<SensitiveEntity>,
        stats: AnalysisStats,
    },
    /// Terminal failure with a human-readable message
    Error { message: String },
}

impl StreamEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tags() {
        let event = StreamEvent::Thinking {
            chunk_id: "chunk-2".to_string(),
            entities: Vec::new(),
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "thinking");
        assert_eq!(value["chunkId"], "chunk-2");

        let error = StreamEvent::Error {
            message: "boom".to_string(),
        };
        assert_eq!(serde_json::to_value(&error).unwrap()["type"], "error");
    }

    #[test]
    fn test_terminal_classification() {
        assert!(StreamEvent::Error {
            message: String::new()
        }
        .is_terminal());
        assert!(!StreamEvent::Thinking {
            chunk_id: String::new(),
            entities: Vec::new(),
            timestamp: Utc::now(),
        }
        .is_terminal());
    }
}
