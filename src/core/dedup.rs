//! Finding deduplication
//!
//! Independent chunks overlap, so the same entity routinely arrives more
//! than once. Reconciliation is a streaming reduce over shape-specific
//! identity keys: for each distinct key the highest-confidence sighting
//! survives, and output order is the order keys were first seen.

use crate::domain::{ContentShape, SensitiveEntity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Deduplicator settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Compare unstructured excerpts case-sensitively
    #[serde(default)]
    pub case_sensitive: bool,
}

/// Reduce findings to one entity per identity key
///
/// A later sighting replaces the kept one only on strictly higher
/// confidence, so ties keep the first encountered. Entities whose variant
/// does not match `shape` cannot produce a comparable key and are excluded
/// from the pass; mixed-variant input degrades gracefully rather than
/// raising.
///
/// # Examples
///
/// ```
/// use sentra::core::dedup::{remove_duplicates, DedupConfig};
/// use sentra::domain::{ContentShape, EntityDetails, SensitiveEntity};
///
/// let sighting = |confidence: f64, excerpt: &str| SensitiveEntity::Unstructured {
///     details: EntityDetails {
///         label: "Email address".to_string(),
///         policy_reference: "pol-1".to_string(),
///         confidence,
///         severity_hex: "D9534F".to_string(),
///         category: "contact".to_string(),
///     },
///     excerpt: excerpt.to_string(),
/// };
///
/// let kept = remove_duplicates(
///     vec![sighting(7.0, "John@x.com"), sighting(9.0, "john@x.com")],
///     ContentShape::Unstructured,
///     &DedupConfig::default(),
/// );
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].confidence(), 9.0);
/// ```
pub fn remove_duplicates(
    entities: Vec<SensitiveEntity>,
    shape: ContentShape,
    config: &DedupConfig,
) -> Vec<SensitiveEntity> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<SensitiveEntity> = Vec::new();

    for entity in entities {
        if entity.shape() != shape {
            tracing::warn!(
                expected = %shape,
                found = %entity.shape(),
                label = entity.label(),
                "Dropping finding whose variant does not match the job shape"
            );
            continue;
        }

        let key = identity_key(&entity, config);
        match slots.get(&key) {
            Some(&slot) => {
                if entity.confidence() > kept[slot].confidence() {
                    kept[slot] = entity;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(entity);
            }
        }
    }

    kept
}

/// Shape-specific identity key for a finding
///
/// - unstructured: the excerpt, lowercased unless case-sensitive
/// - spreadsheet: sheet name plus the cell ranges sorted and joined, so
///   range order in the input never affects identity
/// - json / csv: the structural path verbatim
pub fn identity_key(entity: &SensitiveEntity, config: &DedupConfig) -> String {
    match entity {
        SensitiveEntity::Unstructured { excerpt, .. } => {
            if config.case_sensitive {
                excerpt.clone()
            } else {
                excerpt.to_lowercase()
            }
        }
        SensitiveEntity::Spreadsheet {
            cell_ranges,
            sheet_name,
            ..
        } => {
            let mut ranges = cell_ranges.clone();
            ranges.sort();
            format!("{}:{}", sheet_name, ranges.join(","))
        }
        SensitiveEntity::Json { path, .. } | SensitiveEntity::Csv { path, .. } => path.clone(),
    }
}

/// Before/after counters for one dedup pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupStats {
    pub original: usize,
    pub deduplicated: usize,
    pub removed: usize,
    /// Fraction of findings removed; 0.0 for empty input, never NaN
    pub removal_rate: f64,
}

pub fn dedup_stats(original: usize, deduplicated: usize) -> DedupStats {
    let removed = original.saturating_sub(deduplicated);
    let removal_rate = if original == 0 {
        0.0
    } else {
        removed as f64 / original as f64
    };
    DedupStats {
        original,
        deduplicated,
        removed,
        removal_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityDetails;

    fn details(confidence: f64) -> EntityDetails {
        EntityDetails {
            label: "Email address".to_string(),
            policy_reference: "pol-1".to_string(),
            confidence,
            severity_hex: "D9534F".to_string(),
            category: "contact".to_string(),
        }
    }

    fn excerpt_entity(excerpt: &str, confidence: f64) -> SensitiveEntity {
        SensitiveEntity::Unstructured {
            details: details(confidence),
            excerpt: excerpt.to_string(),
        }
    }

    fn sheet_entity(ranges: &[&str], confidence: f64) -> SensitiveEntity {
        SensitiveEntity::Spreadsheet {
            details: details(confidence),
            cell_ranges: ranges.iter().map(|r| r.to_string()).collect(),
            sheet_name: "Customers".to_string(),
        }
    }

    #[test]
    fn test_case_insensitive_collapse_keeps_higher_confidence() {
        let kept = remove_duplicates(
            vec![
                excerpt_entity("John@x.com", 7.0),
                excerpt_entity("john@x.com", 9.0),
            ],
            ContentShape::Unstructured,
            &DedupConfig::default(),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence(), 9.0);
    }

    #[test]
    fn test_case_sensitive_keeps_both() {
        let kept = remove_duplicates(
            vec![
                excerpt_entity("John@x.com", 7.0),
                excerpt_entity("john@x.com", 9.0),
            ],
            ContentShape::Unstructured,
            &DedupConfig {
                case_sensitive: true,
            },
        );
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let first = excerpt_entity("a@x.com", 8.0);
        let second = SensitiveEntity::Unstructured {
            details: EntityDetails {
                category: "other".to_string(),
                ..details(8.0)
            },
            excerpt: "a@x.com".to_string(),
        };
        let kept = remove_duplicates(
            vec![first.clone(), second],
            ContentShape::Unstructured,
            &DedupConfig::default(),
        );
        assert_eq!(kept, vec![first]);
    }

    #[test]
    fn test_output_order_is_first_seen_key_order() {
        let kept = remove_duplicates(
            vec![
                excerpt_entity("b@x.com", 7.0),
                excerpt_entity("a@x.com", 7.0),
                excerpt_entity("B@X.COM", 9.5),
            ],
            ContentShape::Unstructured,
            &DedupConfig::default(),
        );
        let excerpts: Vec<&str> = kept
            .iter()
            .map(|e| match e {
                SensitiveEntity::Unstructured { excerpt, .. } => excerpt.as_str(),
                _ => unreachable!(),
            })
            .collect();
        // "b@x.com" slot keeps first-seen position but upgraded content
        assert_eq!(excerpts, vec!["B@X.COM", "a@x.com"]);
    }

    #[test]
    fn test_range_order_is_identity_irrelevant() {
        let kept = remove_duplicates(
            vec![
                sheet_entity(&["B1:B5", "A1:A5"], 7.0),
                sheet_entity(&["A1:A5", "B1:B5"], 8.0),
            ],
            ContentShape::Spreadsheet,
            &DedupConfig::default(),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence(), 8.0);
    }

    #[test]
    fn test_mismatched_variant_excluded() {
        let kept = remove_duplicates(
            vec![
                excerpt_entity("a@x.com", 9.0),
                SensitiveEntity::Json {
                    details: details(9.0),
                    path: "users[0].email".to_string(),
                },
            ],
            ContentShape::Unstructured,
            &DedupConfig::default(),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].shape(), ContentShape::Unstructured);
    }

    #[test]
    fn test_path_key_verbatim() {
        let a = SensitiveEntity::Json {
            details: details(7.0),
            path: "users[0].email".to_string(),
        };
        let b = SensitiveEntity::Json {
            details: details(8.0),
            path: "users[1].email".to_string(),
        };
        let kept = remove_duplicates(vec![a, b], ContentShape::Json, &DedupConfig::default());
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_stats() {
        let stats = dedup_stats(4, 3);
        assert_eq!(stats.removed, 1);
        assert!((stats.removal_rate - 0.25).abs() < f64::EPSILON);
        assert_eq!(dedup_stats(0, 0).removal_rate, 0.0);
    }
}
