//! Scan command implementation
//!
//! Reads a file, runs the scan pipeline against the configured identifier
//! service, and prints the findings.

use crate::adapters::identifier::HttpEntityIdentifier;
use crate::adapters::policy::BlockPolicyFormatter;
use crate::config::load_config;
use crate::core::pipeline::{ScanPipeline, StreamEvent};
use crate::core::report::ScanReport;
use crate::domain::{ContentShape, ProcessingJob};
use anyhow::Context;
use clap::Args;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the file to scan
    #[arg(short, long)]
    pub input: String,

    /// Content shape: unstructured, spreadsheet, json, or csv.
    /// Inferred from the file extension when omitted.
    #[arg(long)]
    pub shape: Option<String>,

    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Override the configured minimum confidence (0-10)
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Enable strict validation for this scan
    #[arg(long)]
    pub strict: bool,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Starting scan command");

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let content = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read input file: {}", self.input))?;

        let shape = match self.resolve_shape() {
            Ok(shape) => shape,
            Err(e) => {
                println!("❌ {e}");
                println!(
                    "   Supported shapes: {}",
                    ContentShape::all()
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                return Ok(2);
            }
        };

        let mut scan_config = config.scan.clone();
        if let Some(confidence) = self.min_confidence {
            scan_config.minimum_confidence = confidence;
        }
        if self.strict {
            scan_config.strict_mode = true;
        }

        let identifier = HttpEntityIdentifier::new(&config.identifier)?;
        let pipeline = ScanPipeline::new(
            Arc::new(identifier),
            Arc::new(BlockPolicyFormatter),
            scan_config.to_pipeline_config(),
        );
        let job = ProcessingJob::new(content, shape, config.policies.clone());

        println!("🔎 Scanning {} as {} content", self.input, shape);

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let progress = tokio::spawn(async move {
            while let Some(event) = events_rx.recv().await {
                if let StreamEvent::Thinking {
                    chunk_id, entities, ..
                } = event
                {
                    tracing::debug!(
                        chunk = %chunk_id,
                        entities_so_far = entities.len(),
                        "Partial identifier result"
                    );
                }
            }
        });

        let outcome = pipeline.execute(&job, events_tx).await;
        let _ = progress.await;

        match outcome {
            Ok(result) => {
                crate::log_scan_complete!(
                    result.entities.len(),
                    result.stats.processing_time_ms
                );
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print_summary(&ScanReport::from_result(&result));
                }
                Ok(0)
            }
            Err(e) => {
                println!("❌ Scan failed");
                println!("   Error: {e}");
                Ok(4)
            }
        }
    }

    /// Explicit shape flag, or a guess from the input file extension
    fn resolve_shape(&self) -> crate::domain::Result<ContentShape> {
        if let Some(shape) = &self.shape {
            return ContentShape::from_str(shape);
        }
        let extension = Path::new(&self.input)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();
        Ok(match extension.as_str() {
            "csv" => ContentShape::Csv,
            "json" => ContentShape::Json,
            _ => ContentShape::Unstructured,
        })
    }
}

fn print_summary(report: &ScanReport) {
    println!();
    println!("✅ Scan complete: {} finding(s)", report.total_findings());
    println!();
    println!("Statistics:");
    println!("  Chunks analyzed: {}", report.stats.chunks_generated);
    println!("  Entities found: {}", report.stats.entities_found);
    println!("  Passed validation: {}", report.stats.entities_validated);
    println!("  After deduplication: {}", report.stats.entities_deduplicated);
    println!("  Duration: {}ms", report.stats.processing_time_ms);

    if !report.findings_by_category.is_empty() {
        println!();
        println!("Findings by category:");
        let mut categories: Vec<_> = report.findings_by_category.iter().collect();
        categories.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (category, count) in categories {
            println!("  {category}: {count}");
        }
    }

    if !report.samples.is_empty() {
        println!();
        println!("Sample findings:");
        for sample in &report.samples {
            println!(
                "  [{:.1}] {} ({}) at {}",
                sample.confidence, sample.label, sample.category, sample.location
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str, shape: Option<&str>) -> ScanArgs {
        ScanArgs {
            input: input.to_string(),
            shape: shape.map(|s| s.to_string()),
            json: false,
            min_confidence: None,
            strict: false,
        }
    }

    #[test]
    fn test_shape_inferred_from_extension() {
        assert_eq!(
            args("data.csv", None).resolve_shape().unwrap(),
            ContentShape::Csv
        );
        assert_eq!(
            args("export.JSON", None).resolve_shape().unwrap(),
            ContentShape::Json
        );
        assert_eq!(
            args("notes.txt", None).resolve_shape().unwrap(),
            ContentShape::Unstructured
        );
    }

    #[test]
    fn test_explicit_shape_wins() {
        assert_eq!(
            args("data.csv", Some("spreadsheet")).resolve_shape().unwrap(),
            ContentShape::Spreadsheet
        );
    }

    #[test]
    fn test_unknown_shape_is_error() {
        assert!(args("data.csv", Some("parquet")).resolve_shape().is_err());
    }
}
