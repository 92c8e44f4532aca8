//! Output formatting for detection results
//!
//! Formatters for JSON, YAML, and human-readable text. The JSON/YAML shapes
//! are the machine contract consumed by display layers; the human format is
//! a terminal summary.

use anyhow::{Context, Result};

use crate::detection::types::{AppDetection, DetectionResult};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Output formatter for detection results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single application's detection result
    pub fn format(&self, result: &DetectionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .context("Failed to serialize detection result to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(result)
                .context("Failed to serialize detection result to YAML"),
            OutputFormat::Human => Ok(format_result_human(result)),
        }
    }

    /// Formats a detection result together with its application metadata
    pub fn format_app(&self, detection: &AppDetection) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(detection)
                .context("Failed to serialize detection to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(detection)
                .context("Failed to serialize detection to YAML"),
            OutputFormat::Human => {
                let mut out = format!(
                    "{} ({})\n",
                    detection.app.display_name, detection.app.package_name
                );
                out.push_str(&format_result_human(&detection.result));
                Ok(out)
            }
        }
    }

    /// Formats a batch of detections
    pub fn format_batch(&self, detections: &[AppDetection]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(detections)
                .context("Failed to serialize batch results to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(detections)
                .context("Failed to serialize batch results to YAML"),
            OutputFormat::Human => {
                let mut out = String::new();
                for detection in detections {
                    out.push_str(&self.format_app(detection)?);
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }
}

fn format_result_human(result: &DetectionResult) -> String {
    let mut out = format!("Framework: {}\n", result.framework);

    if result.packages.is_empty() {
        out.push_str("No bundled packages detected\n");
        return out;
    }

    out.push_str(&format!("Packages ({}):\n", result.packages.len()));
    for package in &result.packages {
        match &package.version {
            Some(version) => out.push_str(&format!("  {} {}\n", package.name, version)),
            None => out.push_str(&format!("  {}\n", package.name)),
        }
    }
    out
}
