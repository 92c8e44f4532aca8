//! Framework classification by structural signature
//!
//! Classification looks only at entry names, never content. The presence of a
//! framework's engine artifact (the Flutter native library, the React Native
//! JNI library, or the packed JS bundle) is a structural signature, not a
//! heuristic guess, so the first confirmed signature is authoritative and the
//! scan stops there.

use crate::archive::ApkArchive;
use crate::detection::types::FrameworkLabel;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Flutter ships its engine as a native library in every build.
const FLUTTER_ENGINE_SUFFIX: &str = "libflutter.so";

/// React Native's JNI bridge library and its packed JS bundle. Either one
/// confirms the framework; Hermes-based builds may strip one but not both.
const RN_JNI_SUFFIX: &str = "libreactnativejni.so";
const RN_BUNDLE_SUFFIX: &str = "index.android.bundle";

/// Classifies one application from its archives, scanned in supplied order.
///
/// Archives that fail to open are treated as contributing no entries; the scan
/// proceeds to the next split.
pub fn classify(archive_paths: &[PathBuf]) -> FrameworkLabel {
    for path in archive_paths {
        let archive = match ApkArchive::open(path) {
            Ok(a) => a,
            Err(e) => {
                warn!(archive = %path.display(), error = %e, "skipping unreadable archive during classification");
                continue;
            }
        };

        if let Some(label) = signature_match(archive.entry_names()) {
            debug!(archive = %path.display(), framework = %label, "framework signature found");
            return label;
        }
    }

    FrameworkLabel::Unknown
}

/// Checks one archive's entry names for a framework signature.
///
/// Flutter is checked first across all entries so the result does not depend
/// on entry ordering within the container.
pub(crate) fn signature_match(entry_names: &[String]) -> Option<FrameworkLabel> {
    if entry_names
        .iter()
        .any(|name| name.ends_with(FLUTTER_ENGINE_SUFFIX))
    {
        return Some(FrameworkLabel::Flutter);
    }

    if entry_names
        .iter()
        .any(|name| name.ends_with(RN_JNI_SUFFIX) || name.ends_with(RN_BUNDLE_SUFFIX))
    {
        return Some(FrameworkLabel::ReactNative);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flutter_signature() {
        let entries = names(&[
            "classes.dex",
            "lib/arm64-v8a/libflutter.so",
            "assets/flutter_assets/AssetManifest.json",
        ]);
        assert_eq!(signature_match(&entries), Some(FrameworkLabel::Flutter));
    }

    #[test]
    fn test_react_native_jni_signature() {
        let entries = names(&["classes.dex", "lib/armeabi-v7a/libreactnativejni.so"]);
        assert_eq!(signature_match(&entries), Some(FrameworkLabel::ReactNative));
    }

    #[test]
    fn test_react_native_bundle_signature() {
        let entries = names(&["classes.dex", "assets/index.android.bundle"]);
        assert_eq!(signature_match(&entries), Some(FrameworkLabel::ReactNative));
    }

    #[test]
    fn test_no_signature() {
        let entries = names(&["classes.dex", "resources.arsc", "lib/arm64-v8a/libcrypto.so"]);
        assert_eq!(signature_match(&entries), None);
    }

    #[test]
    fn test_flutter_wins_over_react_native_within_one_archive() {
        // both signatures present: the Flutter check runs first and is authoritative
        let entries = names(&[
            "assets/index.android.bundle",
            "lib/arm64-v8a/libflutter.so",
        ]);
        assert_eq!(signature_match(&entries), Some(FrameworkLabel::Flutter));
    }

    #[test]
    fn test_classify_empty_path_list() {
        assert_eq!(classify(&[]), FrameworkLabel::Unknown);
    }

    #[test]
    fn test_classify_unreadable_paths_degrade_to_unknown() {
        let paths = vec![PathBuf::from("/nonexistent/base.apk")];
        assert_eq!(classify(&paths), FrameworkLabel::Unknown);
    }
}
