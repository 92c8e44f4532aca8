//! Subcommand handlers
//!
//! Handlers translate parsed arguments into engine calls and exit codes. The
//! engine itself never fails hard; only CLI-boundary problems (unreadable
//! manifest, unwritable output file) produce a non-zero exit.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::cli::commands::{BatchArgs, DetectArgs};
use crate::cli::output::OutputFormatter;
use crate::detection::service::{AppArchives, DetectionService};
use crate::detection::types::{AppDetection, AppInfo};

pub fn handle_detect(args: &DetectArgs) -> i32 {
    match run_detect(args) {
        Ok(output) => match write_output(&output, args.output.as_deref()) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_batch(args: &BatchArgs) -> i32 {
    match run_batch(args) {
        Ok(output) => match write_output(&output, args.output.as_deref()) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_detect(args: &DetectArgs) -> Result<String> {
    let service = DetectionService::new();
    let result = service.detect(&args.archive_paths, args.framework.map(Into::into));

    info!(
        framework = %result.framework,
        packages = result.packages.len(),
        "detection finished"
    );

    let formatter = OutputFormatter::new(args.format.into());

    // wrap with pass-through metadata only when the caller supplied any
    if args.package.is_some() || args.label.is_some() {
        let detection = AppDetection {
            app: AppInfo {
                package_name: args.package.clone().unwrap_or_default(),
                display_name: args.label.clone().unwrap_or_default(),
            },
            result,
        };
        formatter.format_app(&detection)
    } else {
        formatter.format(&result)
    }
}

fn run_batch(args: &BatchArgs) -> Result<String> {
    let manifest = fs::read_to_string(&args.list_file)
        .with_context(|| format!("Failed to read manifest {}", args.list_file.display()))?;

    let apps = parse_manifest(&manifest)?;
    if apps.is_empty() {
        bail!("Manifest {} lists no applications", args.list_file.display());
    }

    let service = DetectionService::new();
    let detections = service.detect_all(apps);

    OutputFormatter::new(args.format.into()).format_batch(&detections)
}

/// Manifest line format: `<package-name>\t<display-name>\t<path>[:<path>...]`.
/// Blank lines and `#` comments are skipped.
fn parse_manifest(manifest: &str) -> Result<Vec<AppArchives>> {
    let mut apps = Vec::new();

    for (line_no, line) in manifest.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            bail!(
                "Malformed manifest line {}: expected 3 tab-separated fields, got {}",
                line_no + 1,
                fields.len()
            );
        }

        let archive_paths: Vec<PathBuf> = fields[2].split(':').map(PathBuf::from).collect();

        apps.push(AppArchives {
            app: AppInfo {
                package_name: fields[0].to_string(),
                display_name: fields[1].to_string(),
            },
            archive_paths,
        });
    }

    Ok(apps)
}

fn write_output(output: &str, destination: Option<&std::path::Path>) -> Result<()> {
    match destination {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            println!("{}", output);
            Ok(())
        }
    }
}
