//! Finding validation
//!
//! A confidence gate applied to identifier output before findings enter the
//! result set. Validation filters, it never mutates: entities pass or they
//! are dropped.

use crate::domain::SensitiveEntity;
use serde::{Deserialize, Serialize};

/// Confidence floor applied on top of the base threshold in strict mode
const STRICT_CONFIDENCE_FLOOR: f64 = 8.0;

/// Validator settings
///
/// Constructed once per pipeline instance; adjusting settings means building
/// a new value, never mutating one shared with running tasks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum confidence (0-10 scale, inclusive) a finding must reach
    #[serde(default = "default_minimum_confidence")]
    pub minimum_confidence: f64,
    /// Reject unlabeled findings and raise the floor to at least 8
    #[serde(default)]
    pub strict_mode: bool,
}

fn default_minimum_confidence() -> f64 {
    7.0
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            minimum_confidence: default_minimum_confidence(),
            strict_mode: false,
        }
    }
}

impl ValidationConfig {
    /// The confidence floor actually applied, accounting for strict mode
    pub fn effective_floor(&self) -> f64 {
        if self.strict_mode {
            self.minimum_confidence.max(STRICT_CONFIDENCE_FLOOR)
        } else {
            self.minimum_confidence
        }
    }
}

/// Check a single finding against the configured gate
///
/// The lower bound is inclusive: a finding at exactly the threshold passes.
/// Strict mode additionally rejects findings whose label is empty or
/// whitespace-only.
///
/// # Examples
///
/// ```
/// use sentra::core::validate::{is_valid, ValidationConfig};
/// use sentra::domain::{EntityDetails, SensitiveEntity};
///
/// let entity = SensitiveEntity::Unstructured {
///     details: EntityDetails {
///         label: "SSN".to_string(),
///         policy_reference: "pol-1".to_string(),
///         confidence: 7.0,
///         severity_hex: "AA3939".to_string(),
///         category: "identity".to_string(),
///     },
///     excerpt: "123-45-6789".to_string(),
/// };
/// assert!(is_valid(&entity, &ValidationConfig::default()));
/// ```
pub fn is_valid(entity: &SensitiveEntity, config: &ValidationConfig) -> bool {
    if entity.confidence() < config.minimum_confidence {
        return false;
    }
    if config.strict_mode {
        if entity.label().trim().is_empty() {
            return false;
        }
        if entity.confidence() < STRICT_CONFIDENCE_FLOOR {
            return false;
        }
    }
    true
}

/// Filter findings through the gate, preserving input order
pub fn validate_entities(
    entities: Vec<SensitiveEntity>,
    config: &ValidationConfig,
) -> Vec<SensitiveEntity> {
    let before = entities.len();
    let kept: Vec<SensitiveEntity> = entities
        .into_iter()
        .filter(|entity| is_valid(entity, config))
        .collect();
    if kept.len() < before {
        tracing::debug!(
            rejected = before - kept.len(),
            floor = config.effective_floor(),
            strict = config.strict_mode,
            "Findings rejected by validation gate"
        );
    }
    kept
}

/// Validation outcome counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Fraction of findings that passed; 0.0 for empty input, never NaN
    pub validation_rate: f64,
}

/// Summarize how a batch of findings fared against the gate
pub fn validation_stats(entities: &[SensitiveEntity], config: &ValidationConfig) -> ValidationStats {
    let total = entities.len();
    let valid = entities
        .iter()
        .filter(|entity| is_valid(entity, config))
        .count();
    let validation_rate = if total == 0 {
        0.0
    } else {
        valid as f64 / total as f64
    };
    ValidationStats {
        total,
        valid,
        invalid: total - valid,
        validation_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityDetails;

    fn entity(label: &str, confidence: f64) -> SensitiveEntity {
        SensitiveEntity::Unstructured {
            details: EntityDetails {
                label: label.to_string(),
                policy_reference: "pol-1".to_string(),
                confidence,
                severity_hex: "D9534F".to_string(),
                category: "contact".to_string(),
            },
            excerpt: "jane@example.com".to_string(),
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let config = ValidationConfig::default();
        assert!(is_valid(&entity("Email", 7.0), &config));
        assert!(!is_valid(&entity("Email", 6.999), &config));
    }

    #[test]
    fn test_strict_mode_floor() {
        let config = ValidationConfig {
            minimum_confidence: 5.0,
            strict_mode: true,
        };
        // clears the base threshold but not the strict floor
        assert!(!is_valid(&entity("Email", 7.5), &config));
        assert!(is_valid(&entity("Email", 8.0), &config));
        assert_eq!(config.effective_floor(), 8.0);
    }

    #[test]
    fn test_strict_mode_rejects_blank_label() {
        let config = ValidationConfig {
            minimum_confidence: 7.0,
            strict_mode: true,
        };
        assert!(!is_valid(&entity("   ", 9.0), &config));
        assert!(!is_valid(&entity("", 9.0), &config));
        // non-strict mode accepts the same finding
        assert!(is_valid(&entity("", 9.0), &ValidationConfig::default()));
    }

    #[test]
    fn test_filter_preserves_order() {
        let batch = vec![entity("A", 9.0), entity("B", 2.0), entity("C", 8.0)];
        let kept = validate_entities(batch, &ValidationConfig::default());
        let labels: Vec<&str> = kept.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["A", "C"]);
    }

    #[test]
    fn test_stats_rate_never_nan() {
        let stats = validation_stats(&[], &ValidationConfig::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.validation_rate, 0.0);
    }

    #[test]
    fn test_stats_counts() {
        let batch = vec![entity("A", 9.0), entity("B", 2.0)];
        let stats = validation_stats(&batch, &ValidationConfig::default());
        assert_eq!(stats.valid, 1);
        assert_eq!(stats.invalid, 1);
        assert!((stats.validation_rate - 0.5).abs() < f64::EPSILON);
    }
}
