// Sentra - Policy-Guided Sensitive Data Scanner
// Copyright (c) 2025 Sentra Contributors
// Licensed under the MIT License

use clap::Parser;
use sentra::cli::{Cli, Commands};
use sentra::config::LoggingConfig;
use sentra::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI; file logging is driven by the
    // configuration file once a command loads it.
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    if let Err(e) = init_logging(log_level, &LoggingConfig::default()) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Sentra - sensitive data scanner"
    );

    let outcome = match &cli.command {
        Commands::Scan(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    };

    match outcome {
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("❌ {e:#}");
            process::exit(5);
        }
    }
}
