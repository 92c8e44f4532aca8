//! apkscope - static framework and package detection for installed Android apps
//!
//! This library inspects an application's installation archives (one base APK
//! plus zero or more split APKs) to determine which UI framework it was built
//! with and which third-party packages it bundles. Inspection is purely
//! static: archive entry names and selected entry contents. Nothing is
//! executed, nothing is fetched, and the app's manifest is not trusted.
//!
//! # Core Concepts
//!
//! - **Classification**: framework identity is established by structural
//!   signatures (engine libraries, the packed JS bundle), scanned over entry
//!   names only. The first confirmed signature is authoritative.
//! - **Extraction**: per-framework sets of independent best-effort heuristics
//!   whose observations are merged into one deduplicated, versioned package
//!   list. Version-bearing evidence (a bundled lockfile) always wins over
//!   name-only evidence.
//! - **Resilience**: no archive or entry failure is fatal. The worst outcome
//!   for one application is an `Unknown` framework with no packages, so a
//!   batch over many installed applications never aborts.
//!
//! # Example Usage
//!
//! ```no_run
//! use apkscope::DetectionService;
//! use std::path::PathBuf;
//!
//! let service = DetectionService::new();
//! let result = service.detect(
//!     &[
//!         PathBuf::from("/data/app/com.example-1/base.apk"),
//!         PathBuf::from("/data/app/com.example-1/split_config.arm64_v8a.apk"),
//!     ],
//!     None,
//! );
//!
//! println!("Framework: {}", result.framework);
//! for package in &result.packages {
//!     println!("{} {}", package.name, package.version.as_deref().unwrap_or("-"));
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`archive`]: zip container access with per-entry lazy reads
//! - [`detection`]: classifier, orchestration service, and result types
//! - [`extractors`]: per-framework package extraction heuristics
//! - [`cli`]: command definitions, handlers, and output formatting

// Public modules
pub mod archive;
pub mod cli;
pub mod detection;
pub mod extractors;

// Re-export key types for convenient access
pub use archive::{ApkArchive, ArchiveError};
pub use detection::service::{AppArchives, DetectionService};
pub use detection::types::{
    AppDetection, AppInfo, DetectionResult, FrameworkLabel, PackageRecord,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_apkscope() {
        assert_eq!(NAME, "apkscope");
    }
}
