//! Content shape classification
//!
//! The content shape selects the chunking strategy, the entity variant the
//! identifier is expected to return, and the identity key used during
//! deduplication.

use crate::domain::errors::SentraError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structural kind of the content submitted for scanning
///
/// This is a closed enumeration: every scan job carries exactly one of these
/// values, and the chunker, identifier adapter, and deduplicator all branch
/// on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentShape {
    /// Free text with no structural markers
    Unstructured,
    /// Spreadsheet export (analyzed column-wise as CSV)
    Spreadsheet,
    /// JSON documents
    Json,
    /// Comma-separated values
    Csv,
}

impl ContentShape {
    /// Canonical lowercase name, as used in configuration and wire payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unstructured => "unstructured",
            Self::Spreadsheet => "spreadsheet",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// All recognized shapes, used in error messages and CLI help text
    pub fn all() -> &'static [ContentShape] {
        &[
            Self::Unstructured,
            Self::Spreadsheet,
            Self::Json,
            Self::Csv,
        ]
    }
}

impl fmt::Display for ContentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentShape {
    type Err = SentraError;

    /// Parse a shape name from CLI arguments or configuration
    ///
    /// # Errors
    ///
    /// Returns [`SentraError::UnsupportedShape`] for any value outside the
    /// closed set of shape names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unstructured" | "text" => Ok(Self::Unstructured),
            "spreadsheet" => Ok(Self::Spreadsheet),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(SentraError::UnsupportedShape(other.to_string())),
        }
    }
}
