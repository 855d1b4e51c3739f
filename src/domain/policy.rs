//! Policy references
//!
//! A policy reference names a data-handling policy that guides the entity
//! identifier. The raw records are rendered into prompt text by the policy
//! formatter adapter; the core only requires a stable id and a display name.

use serde::{Deserialize, Serialize};

/// Reference to a data-handling policy guiding a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRef {
    /// Stable policy identifier (non-empty for a valid job)
    pub id: String,
    /// Human-readable policy name (non-empty for a valid job)
    pub name: String,
    /// Optional one-line summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional full policy text forwarded to the identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PolicyRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            content: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// A reference is well-formed when both id and name carry visible text
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let policy = PolicyRef::new("pol-7", "PCI scope")
            .with_description("Payment card data")
            .with_content("Flag PANs, CVVs and expiry dates.");
        assert_eq!(policy.id, "pol-7");
        assert!(policy.content.unwrap().contains("PAN"));
    }

    #[test]
    fn test_well_formed_requires_visible_text() {
        assert!(PolicyRef::new("p1", "GDPR").is_well_formed());
        assert!(!PolicyRef::new("  ", "GDPR").is_well_formed());
        assert!(!PolicyRef::new("p1", "").is_well_formed());
    }
}
