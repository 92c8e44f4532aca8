//! Detection service orchestration
//!
//! This module provides the high-level `DetectionService` that ties the
//! classifier and the per-framework extractors together.
//!
//! # Architecture
//!
//! The service acts as a thin orchestration layer:
//! 1. Classifies the application's archives (entry names only)
//! 2. Dispatches to the extractor matching the classified framework
//! 3. Tracks timing metrics
//! 4. Returns a canonically ordered result
//!
//! No error escapes `detect`: an unreadable split contributes nothing, and an
//! application whose archives are all unreadable degrades to `Unknown` with an
//! empty package list. A batch over many applications must never abort
//! because one of them is broken.
//!
//! # Example
//!
//! ```no_run
//! use apkscope::detection::service::DetectionService;
//! use std::path::PathBuf;
//!
//! let service = DetectionService::new();
//! let result = service.detect(&[PathBuf::from("/data/app/base.apk")], None);
//!
//! println!("Framework: {}", result.framework);
//! for package in &result.packages {
//!     println!("  {} {}", package.name, package.version.as_deref().unwrap_or("-"));
//! }
//! ```

use crate::detection::classifier;
use crate::detection::types::{AppDetection, AppInfo, DetectionResult, FrameworkLabel};
use crate::extractors::{flutter, react_native};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// One application queued for batch detection: opaque metadata plus its
/// base + split archive paths in enumeration order.
#[derive(Debug, Clone)]
pub struct AppArchives {
    pub app: AppInfo,
    pub archive_paths: Vec<PathBuf>,
}

/// Orchestrates framework classification and package extraction
#[derive(Debug, Default)]
pub struct DetectionService;

impl DetectionService {
    pub fn new() -> Self {
        Self
    }

    /// Detects framework and bundled packages for one application.
    ///
    /// `framework_hint` skips classification when the caller already knows the
    /// framework for this archive snapshot. Archive paths must be supplied in
    /// enumeration order: the classifier's first-match rule and the lockfile
    /// last-write rule depend on it.
    pub fn detect(
        &self,
        archive_paths: &[PathBuf],
        framework_hint: Option<FrameworkLabel>,
    ) -> DetectionResult {
        let start = Instant::now();

        let framework = framework_hint.unwrap_or_else(|| classifier::classify(archive_paths));

        let packages = match framework {
            FrameworkLabel::Flutter => flutter::extract(archive_paths),
            FrameworkLabel::ReactNative => react_native::extract(archive_paths),
            FrameworkLabel::Unknown => Vec::new(),
        };

        let result = DetectionResult::new(framework, packages);

        debug!(
            framework = %result.framework,
            packages = result.packages.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "detection complete"
        );

        result
    }

    /// Detects many applications in parallel.
    ///
    /// Each application is independent, so the batch fans out over the rayon
    /// pool; results come back sorted by package name for stable output.
    pub fn detect_all(&self, apps: Vec<AppArchives>) -> Vec<AppDetection> {
        let start = Instant::now();
        let total = apps.len();

        let mut detections: Vec<AppDetection> = apps
            .into_par_iter()
            .map(|entry| AppDetection {
                result: self.detect(&entry.archive_paths, None),
                app: entry.app,
            })
            .collect();

        detections.sort_by(|a, b| a.app.package_name.cmp(&b.app.package_name));

        info!(
            apps = total,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch detection complete"
        );

        detections
    }
}
