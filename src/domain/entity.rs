//! Sensitive entity data model
//!
//! A finding produced by the entity identifier. The variant carries the
//! shape-specific locator: a verbatim excerpt for free text, cell ranges for
//! spreadsheets, and a structural path for JSON and CSV content. The variant
//! must match the [`ContentShape`] of the chunk the finding was derived from;
//! mismatches are rejected downstream, never coerced.

use crate::domain::content::ContentShape;
use serde::{Deserialize, Serialize};

/// Fields shared by every finding regardless of content shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDetails {
    /// Short human-readable label for the finding (e.g. "Email address")
    pub label: String,
    /// Identifier of the policy that flagged this entity
    #[serde(rename = "policyReference")]
    pub policy_reference: String,
    /// Identifier confidence on a 0-10 scale
    pub confidence: f64,
    /// Display color as six hex digits, no leading `#`
    #[serde(rename = "severityHex")]
    pub severity_hex: String,
    /// Category of sensitive data (e.g. "credentials", "financial")
    pub category: String,
}

/// A single sensitive-data finding
///
/// Serialized with a `shape` tag so identifier responses and CLI output share
/// one wire form:
///
/// ```json
/// {"shape":"unstructured","label":"Email address","policyReference":"pol-1",
///  "confidence":9.0,"severityHex":"D9534F","category":"contact",
///  "excerpt":"jane@example.com"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum SensitiveEntity {
    /// Finding in free text, located by the verbatim matched excerpt
    Unstructured {
        #[serde(flatten)]
        details: EntityDetails,
        /// Verbatim text that matched
        excerpt: String,
    },
    /// Finding in a spreadsheet, located by sheet name and cell ranges
    Spreadsheet {
        #[serde(flatten)]
        details: EntityDetails,
        /// Cell ranges in A1 notation, e.g. `["A1:A5", "B2"]`
        #[serde(rename = "cellRanges")]
        cell_ranges: Vec<String>,
        #[serde(rename = "sheetName")]
        sheet_name: String,
    },
    /// Finding in a JSON document, located by structural path
    Json {
        #[serde(flatten)]
        details: EntityDetails,
        /// Structural locator, e.g. `customers[2].email`
        path: String,
    },
    /// Finding in CSV content, located by structural path
    Csv {
        #[serde(flatten)]
        details: EntityDetails,
        /// Structural locator, e.g. `email:row3`
        path: String,
    },
}

impl SensitiveEntity {
    /// The content shape this variant belongs to
    pub fn shape(&self) -> ContentShape {
        match self {
            Self::Unstructured { .. } => ContentShape::Unstructured,
            Self::Spreadsheet { .. } => ContentShape::Spreadsheet,
            Self::Json { .. } => ContentShape::Json,
            Self::Csv { .. } => ContentShape::Csv,
        }
    }

    /// Shared fields, independent of the variant
    pub fn details(&self) -> &EntityDetails {
        match self {
            Self::Unstructured { details, .. }
            | Self::Spreadsheet { details, .. }
            | Self::Json { details, .. }
            | Self::Csv { details, .. } => details,
        }
    }

    pub fn label(&self) -> &str {
        &self.details().label
    }

    pub fn confidence(&self) -> f64 {
        self.details().confidence
    }

    pub fn category(&self) -> &str {
        &self.details().category
    }

    pub fn policy_reference(&self) -> &str {
        &self.details().policy_reference
    }
}
