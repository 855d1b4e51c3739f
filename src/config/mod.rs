//! Configuration management for Sentra.
//!
//! TOML-based configuration loading, parsing, and validation with
//! environment variable substitution and `SENTRA_*` overrides.
//!
//! # Example configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [identifier]
//! endpoint = "https://identify.example.com/v1/identify"
//! api_key = "${SENTRA_IDENTIFIER_API_KEY}"
//! timeout_seconds = 60
//!
//! [scan]
//! chunk_size = 2000
//! overlap = 200
//! concurrency = 5
//! minimum_confidence = 7.0
//!
//! [[policy]]
//! id = "pol-gdpr"
//! name = "GDPR personal data"
//! description = "Personal data of EU residents"
//! ```
//!
//! Secrets referenced with `${VAR_NAME}` are substituted at load time and
//! held as redacted [`SecretString`] values afterwards.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, IdentifierConfig, LoggingConfig, ScanConfig, SentraConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
