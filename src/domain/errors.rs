//! Domain error types
//!
//! All errors are domain-specific and never expose third-party types; the
//! identifier adapter maps transport failures into [`IdentifierError`]
//! before they reach the pipeline.

use thiserror::Error;

/// Main Sentra error type
#[derive(Debug, Error)]
pub enum SentraError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed scan job, rejected before any chunk work
    #[error("Invalid job: {0}")]
    InvalidJob(String),

    /// Content shape outside the supported set
    #[error("Unsupported content shape: {0}")]
    UnsupportedShape(String),

    /// Failure inside one chunk's identify/validate path, fatal to the job
    #[error("Chunk {index} failed: {source}")]
    ChunkTask {
        index: usize,
        #[source]
        source: IdentifierError,
    },

    /// Identifier failure outside any particular chunk (e.g. warm-up probe)
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors surfaced by the external entity identifier collaborator
///
/// Opaque from the pipeline's point of view: any of these aborts the chunk
/// task that observed it, and the pipeline performs no retry.
#[derive(Debug, Error)]
pub enum IdentifierError {
    /// Failed to reach the identifier service
    #[error("Failed to connect to identifier service: {0}")]
    ConnectionFailed(String),

    /// Service answered with a non-success status
    #[error("Identifier service error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Response body could not be understood
    #[error("Invalid identifier response: {0}")]
    InvalidResponse(String),

    /// The streamed response ended before a terminal result arrived
    #[error("Identifier stream ended early: {0}")]
    Interrupted(String),
}

impl From<std::io::Error> for SentraError {
    fn from(err: std::io::Error) -> Self {
        SentraError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SentraError {
    fn from(err: serde_json::Error) -> Self {
        SentraError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SentraError {
    fn from(err: toml::de::Error) -> Self {
        SentraError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SentraError::InvalidJob("content is empty".to_string());
        assert_eq!(err.to_string(), "Invalid job: content is empty");
    }

    #[test]
    fn test_chunk_task_carries_index() {
        let err = SentraError::ChunkTask {
            index: 4,
            source: IdentifierError::Http {
                status: 503,
                message: "overloaded".to_string(),
            },
        };
        let text = err.to_string();
        assert!(text.contains("Chunk 4"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_identifier_error_conversion() {
        let err: SentraError = IdentifierError::ConnectionFailed("refused".to_string()).into();
        assert!(matches!(err, SentraError::Identifier(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SentraError = io_err.into();
        assert!(matches!(err, SentraError::Io(_)));
    }
}
