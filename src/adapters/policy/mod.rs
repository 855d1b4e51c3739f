//! Policy formatting collaborator boundary
//!
//! Raw policy records are rendered into a single prompt-text block that the
//! identifier receives alongside each chunk. The pipeline caches rendered
//! text per distinct policy set, so formatting cost is paid once per job
//! family rather than once per chunk.

use crate::domain::PolicyRef;

/// Renders policy references into identifier guidance text
pub trait PolicyFormatter: Send + Sync {
    fn format(&self, policies: &[PolicyRef]) -> String;
}

/// Default renderer: one numbered block per policy
///
/// Produces output of the form:
///
/// ```text
/// Policy 1: GDPR personal data [pol-gdpr]
/// Personal data of EU residents...
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockPolicyFormatter;

impl PolicyFormatter for BlockPolicyFormatter {
    fn format(&self, policies: &[PolicyRef]) -> String {
        let mut blocks = Vec::with_capacity(policies.len());
        for (index, policy) in policies.iter().enumerate() {
            let mut block = format!("Policy {}: {} [{}]", index + 1, policy.name, policy.id);
            if let Some(description) = &policy.description {
                if !description.trim().is_empty() {
                    block.push('\n');
                    block.push_str(description.trim());
                }
            }
            if let Some(content) = &policy.content {
                if !content.trim().is_empty() {
                    block.push('\n');
                    block.push_str(content.trim());
                }
            }
            blocks.push(block);
        }
        blocks.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_are_numbered_and_labeled() {
        let formatter = BlockPolicyFormatter;
        let text = formatter.format(&[
            PolicyRef::new("pol-gdpr", "GDPR personal data")
                .with_description("Personal data of EU residents"),
            PolicyRef::new("pol-pci", "PCI cardholder data")
                .with_content("Flag PANs and CVVs."),
        ]);
        assert!(text.starts_with("Policy 1: GDPR personal data [pol-gdpr]"));
        assert!(text.contains("Policy 2: PCI cardholder data [pol-pci]"));
        assert!(text.contains("Flag PANs and CVVs."));
    }

    #[test]
    fn test_blank_optional_fields_skipped() {
        let formatter = BlockPolicyFormatter;
        let text = formatter.format(&[
            PolicyRef::new("p1", "Name").with_description("   ")
        ]);
        assert_eq!(text, "Policy 1: Name [p1]");
    }
}
