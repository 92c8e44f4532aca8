pub mod classifier;
pub mod service;
pub mod types;

pub use classifier::classify;
pub use service::{AppArchives, DetectionService};
pub use types::{AppDetection, AppInfo, DetectionResult, FrameworkLabel, PackageRecord};
