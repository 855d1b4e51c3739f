//! Configuration schema types
//!
//! Defines the structure of `sentra.toml`. Sections are immutable once
//! loaded; runtime components copy the values they need at construction
//! time rather than sharing mutable configuration.

use crate::config::SecretString;
use crate::core::chunker::ChunkOptions;
use crate::core::dedup::DedupConfig;
use crate::core::pipeline::PipelineConfig;
use crate::core::validate::ValidationConfig;
use crate::domain::PolicyRef;
use serde::{Deserialize, Serialize};

/// Main Sentra configuration, the root of the TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentraConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Entity identifier service connection
    pub identifier: IdentifierConfig,

    /// Scan pipeline tunables
    #[serde(default)]
    pub scan: ScanConfig,

    /// Policies guiding every scan run by this installation
    #[serde(default, rename = "policy")]
    pub policies: Vec<PolicyRef>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SentraConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.identifier.validate()?;
        self.scan.validate()?;
        self.logging.validate()?;

        if self.policies.is_empty() {
            return Err("at least one [[policy]] entry is required".to_string());
        }
        for (index, policy) in self.policies.iter().enumerate() {
            if !policy.is_well_formed() {
                return Err(format!(
                    "policy at index {index} must have a non-empty id and name"
                ));
            }
        }
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(format!("invalid log_level: {other}")),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Entity identifier service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierConfig {
    /// Endpoint URL of the identification service
    pub endpoint: String,

    /// Bearer token for the service, if it requires one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,

    /// Optional model override forwarded to the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl IdentifierConfig {
    fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("identifier.endpoint must not be empty".to_string());
        }
        url::Url::parse(&self.endpoint)
            .map_err(|e| format!("identifier.endpoint is not a valid URL: {e}"))?;
        if self.timeout_seconds == 0 {
            return Err("identifier.timeout_seconds must be at least 1".to_string());
        }
        Ok(())
    }
}

fn default_timeout_seconds() -> u64 {
    60
}

/// Scan pipeline tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Target chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Characters shared between consecutive text chunks
    #[serde(default = "default_overlap")]
    pub overlap: usize,
    /// Columns per chunk for tabular content
    #[serde(default = "default_column_chunk_size")]
    pub column_chunk_size: usize,
    /// Maximum chunk tasks in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Minimum confidence (0-10) a finding must reach
    #[serde(default = "default_minimum_confidence")]
    pub minimum_confidence: f64,
    /// Reject unlabeled findings and raise the floor to at least 8
    #[serde(default)]
    pub strict_mode: bool,
    /// Compare text excerpts case-sensitively during deduplication
    #[serde(default)]
    pub case_sensitive: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
            column_chunk_size: default_column_chunk_size(),
            concurrency: default_concurrency(),
            minimum_confidence: default_minimum_confidence(),
            strict_mode: false,
            case_sensitive: false,
        }
    }
}

impl ScanConfig {
    fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("scan.chunk_size must be at least 1".to_string());
        }
        if self.concurrency == 0 {
            return Err("scan.concurrency must be at least 1".to_string());
        }
        if !(0.0..=10.0).contains(&self.minimum_confidence) {
            return Err("scan.minimum_confidence must be between 0 and 10".to_string());
        }
        Ok(())
    }

    /// Assemble the pipeline configuration from these settings
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            concurrency: self.concurrency,
            chunking: ChunkOptions {
                chunk_size: self.chunk_size,
                overlap: self.overlap,
                column_chunk_size: self.column_chunk_size,
            },
            validation: ValidationConfig {
                minimum_confidence: self.minimum_confidence,
                strict_mode: self.strict_mode,
            },
            dedup: DedupConfig {
                case_sensitive: self.case_sensitive,
            },
        }
    }
}

fn default_chunk_size() -> usize {
    2000
}

fn default_overlap() -> usize {
    200
}

fn default_column_chunk_size() -> usize {
    4
}

fn default_concurrency() -> usize {
    5
}

fn default_minimum_confidence() -> f64 {
    7.0
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rolling log files in addition to console output
    #[serde(default)]
    pub local_enabled: bool,
    /// Directory for rolling log files
    #[serde(default = "default_log_path")]
    pub local_path: String,
    /// Rotation cadence: daily or hourly
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must be set when local logging is enabled".to_string());
        }
        match self.local_rotation.as_str() {
            "daily" | "hourly" => Ok(()),
            other => Err(format!("invalid logging.local_rotation: {other}")),
        }
    }
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
