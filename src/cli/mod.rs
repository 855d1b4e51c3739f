//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Sentra using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Sentra - policy-guided sensitive data scanner
#[derive(Parser, Debug)]
#[command(name = "sentra")]
#[command(version, about, long_about = None)]
#[command(author = "Sentra Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sentra.toml", env = "SENTRA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SENTRA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a file for sensitive data findings
    Scan(commands::scan::ScanArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
