//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration file loaded successfully");
                config
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Identifier Endpoint: {}", config.identifier.endpoint);
        println!(
            "  Identifier API Key: {}",
            if config.identifier.api_key.is_some() {
                "set (redacted)"
            } else {
                "not set"
            }
        );
        println!("  Chunk Size: {}", config.scan.chunk_size);
        println!("  Overlap: {}", config.scan.overlap);
        println!("  Concurrency: {}", config.scan.concurrency);
        println!("  Minimum Confidence: {}", config.scan.minimum_confidence);
        println!("  Strict Mode: {}", config.scan.strict_mode);
        println!("  Policies: {}", config.policies.len());
        for policy in &config.policies {
            println!("    - {} [{}]", policy.name, policy.id);
        }

        Ok(0)
    }
}
