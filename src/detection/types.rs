//! Core data model for framework and package detection

use serde::{Deserialize, Serialize};
use std::fmt;

/// UI framework an application was built with.
///
/// Serialized labels are part of the external contract: the display layer
/// pattern-matches on the exact strings, including the space in "React Native".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameworkLabel {
    Flutter,
    #[serde(rename = "React Native")]
    ReactNative,
    Unknown,
}

impl FrameworkLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkLabel::Flutter => "Flutter",
            FrameworkLabel::ReactNative => "React Native",
            FrameworkLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FrameworkLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bundled third-party package. `name` is the dedup key, case-sensitive;
/// `version` is present only when version-bearing evidence (a lockfile) named it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: Option<String>,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

/// Result of one detection run over an application's archives.
///
/// Built fresh on every invocation and never mutated afterwards. Package names
/// are unique within a result and sorted ascending so serialized output is
/// byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub framework: FrameworkLabel,
    pub packages: Vec<PackageRecord>,
}

impl DetectionResult {
    /// Creates a result, establishing the canonical name-sorted package order.
    pub fn new(framework: FrameworkLabel, mut packages: Vec<PackageRecord>) -> Self {
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            framework,
            packages,
        }
    }

    pub fn unknown() -> Self {
        Self {
            framework: FrameworkLabel::Unknown,
            packages: Vec::new(),
        }
    }
}

/// Opaque application metadata supplied by the enumeration collaborator.
///
/// Passed through to output untouched; the engine never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub package_name: String,
    pub display_name: String,
}

/// Detection outcome for one application in a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDetection {
    #[serde(flatten)]
    pub app: AppInfo,
    #[serde(flatten)]
    pub result: DetectionResult,
}
