//! Scan reporting
//!
//! Aggregates a pipeline result into the per-category and per-policy
//! breakdowns shown by the CLI after a scan.

use crate::domain::{AnalysisStats, PipelineResult, SensitiveEntity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of sample findings carried in a report
const MAX_SAMPLES: usize = 20;

/// Human-oriented summary of one scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Findings grouped by category
    pub findings_by_category: HashMap<String, usize>,
    /// Findings grouped by the policy that flagged them
    pub findings_by_policy: HashMap<String, usize>,
    /// A bounded sample of findings for display
    pub samples: Vec<FindingSample>,
    /// The run's aggregate counters
    pub stats: AnalysisStats,
}

/// One displayable finding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingSample {
    pub label: String,
    pub category: String,
    pub confidence: f64,
    /// Shape-specific locator rendered as text
    pub location: String,
}

impl ScanReport {
    /// Build a report from a completed pipeline result
    pub fn from_result(result: &PipelineResult) -> Self {
        let mut findings_by_category: HashMap<String, usize> = HashMap::new();
        let mut findings_by_policy: HashMap<String, usize> = HashMap::new();
        let mut samples = Vec::new();

        for entity in &result.entities {
            *findings_by_category
                .entry(entity.category().to_string())
                .or_insert(0) += 1;
            *findings_by_policy
                .entry(entity.policy_reference().to_string())
                .or_insert(0) += 1;

            if samples.len() < MAX_SAMPLES {
                samples.push(FindingSample {
                    label: entity.label().to_string(),
                    category: entity.category().to_string(),
                    confidence: entity.confidence(),
                    location: render_location(entity),
                });
            }
        }

        Self {
            findings_by_category,
            findings_by_policy,
            samples,
            stats: result.stats.clone(),
        }
    }

    pub fn total_findings(&self) -> usize {
        self.stats.entities_deduplicated
    }
}

/// Render the variant-specific locator for display, truncating long excerpts
fn render_location(entity: &SensitiveEntity) -> String {
    match entity {
        SensitiveEntity::Unstructured { excerpt, .. } => {
            let shortened: String = excerpt.chars().take(47).collect();
            if excerpt.chars().count() > 47 {
                format!("\"{shortened}...\"")
            } else {
                format!("\"{shortened}\"")
            }
        }
        SensitiveEntity::Spreadsheet {
            cell_ranges,
            sheet_name,
            ..
        } => format!("{} {}", sheet_name, cell_ranges.join(", ")),
        SensitiveEntity::Json { path, .. } | SensitiveEntity::Csv { path, .. } => path.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityDetails, PipelineResult};

    fn entity(category: &str, policy: &str, excerpt: &str) -> SensitiveEntity {
        SensitiveEntity::Unstructured {
            details: EntityDetails {
                label: "Email address".to_string(),
                policy_reference: policy.to_string(),
                confidence: 9.0,
                severity_hex: "D9534F".to_string(),
                category: category.to_string(),
            },
            excerpt: excerpt.to_string(),
        }
    }

    fn result(entities: Vec<SensitiveEntity>) -> PipelineResult {
        let stats = AnalysisStats {
            entities_deduplicated: entities.len(),
            ..AnalysisStats::default()
        };
        PipelineResult {
            entities,
            chunks: Vec::new(),
            stats,
        }
    }

    #[test]
    fn test_category_and_policy_counts() {
        let report = ScanReport::from_result(&result(vec![
            entity("contact", "pol-1", "a@x.com"),
            entity("contact", "pol-2", "b@x.com"),
            entity("identity", "pol-1", "123-45-6789"),
        ]));
        assert_eq!(report.findings_by_category["contact"], 2);
        assert_eq!(report.findings_by_policy["pol-1"], 2);
        assert_eq!(report.total_findings(), 3);
    }

    #[test]
    fn test_long_excerpt_truncated() {
        let long = "x".repeat(80);
        let report = ScanReport::from_result(&result(vec![entity("contact", "pol-1", &long)]));
        assert!(report.samples[0].location.ends_with("...\""));
        assert!(report.samples[0].location.len() < 60);
    }

    #[test]
    fn test_samples_bounded() {
        let entities = (0..30)
            .map(|i| entity("contact", "pol-1", &format!("user{i}@x.com")))
            .collect();
        let report = ScanReport::from_result(&result(entities));
        assert_eq!(report.samples.len(), MAX_SAMPLES);
    }
}
