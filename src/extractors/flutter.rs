//! Package extraction for Flutter applications
//!
//! Seven independent heuristics run over each archive. The pubspec.lock
//! heuristic is the only version-bearing source and is authoritative: name-only
//! observations never overwrite a lockfile entry, they only add packages the
//! lockfile did not mention.

use crate::archive::ApkArchive;
use crate::detection::types::PackageRecord;
use crate::extractors::common::{native_lib_names, signature_file_names};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::{debug, warn};

const LOCKFILE_ENTRY: &str = "assets/pubspec.lock";

/// Dart snapshot and kernel artifacts that embed `package:` import URIs
const SNAPSHOT_FILES: [&str; 3] = ["libapp.so", "app.dill", "kernel_blob.bin"];

/// Extracts bundled packages from an application already classified as Flutter.
///
/// Archives that fail to open contribute nothing; extraction continues with
/// the remaining splits.
pub fn extract(archive_paths: &[PathBuf]) -> Vec<PackageRecord> {
    let mut versioned: BTreeMap<String, String> = BTreeMap::new();
    let mut name_only: BTreeSet<String> = BTreeSet::new();

    for path in archive_paths {
        let mut archive = match ApkArchive::open(path) {
            Ok(a) => a,
            Err(e) => {
                warn!(archive = %path.display(), error = %e, "skipping unreadable archive during extraction");
                continue;
            }
        };

        // lockfile entries overwrite earlier archives' values; duplicate
        // lockfiles across splits are expected to be identical in practice
        collect_lockfile_versions(&mut archive, &mut versioned);

        let entry_names: Vec<String> = archive.entry_names().to_vec();
        name_only.extend(asset_package_names(&entry_names));
        name_only.extend(native_lib_names(&entry_names));
        name_only.extend(signature_file_names(&entry_names));
        name_only.extend(snapshot_package_refs(&mut archive, &entry_names));
        name_only.extend(asset_content_package_refs(&mut archive, &entry_names));
    }

    merge(versioned, name_only)
}

/// Merge policy: lockfile evidence first, then name-only observations for
/// packages the lockfile did not cover.
fn merge(versioned: BTreeMap<String, String>, name_only: BTreeSet<String>) -> Vec<PackageRecord> {
    let mut records: BTreeMap<String, Option<String>> = versioned
        .into_iter()
        .map(|(name, version)| (name, Some(version)))
        .collect();

    for name in name_only {
        records.entry(name).or_insert(None);
    }

    records
        .into_iter()
        .map(|(name, version)| PackageRecord::new(name, version))
        .collect()
}

/// Lockfile heuristic: parses `assets/pubspec.lock` as YAML and records every
/// `packages.<name>.version` pair. A malformed or missing lockfile contributes
/// nothing; the name-only heuristics still populate the result.
fn collect_lockfile_versions(archive: &mut ApkArchive, versioned: &mut BTreeMap<String, String>) {
    let Some(text) = archive.read_text(LOCKFILE_ENTRY) else {
        return;
    };

    let doc: serde_yaml::Value = match serde_yaml::from_str(&text) {
        Ok(doc) => doc,
        Err(e) => {
            debug!(archive = %archive.path().display(), error = %e, "pubspec.lock did not parse, falling back to name-only heuristics");
            return;
        }
    };

    let Some(packages) = doc.get("packages").and_then(|v| v.as_mapping()) else {
        return;
    };

    for (key, value) in packages {
        let Some(name) = key.as_str() else { continue };
        let Some(version) = value.get("version").and_then(|v| v.as_str()) else {
            continue;
        };
        versioned.insert(name.to_string(), version.to_string());
    }
}

/// Asset-path heuristics: package-scoped asset directories under both the
/// bare and flutter-prefixed layouts.
fn asset_package_names(entry_names: &[String]) -> Vec<String> {
    let asset_re = Regex::new(r"assets/packages/([^/]+)/").expect("valid regex");
    let flutter_re = Regex::new(r"flutter_assets/packages/([^/]+)/").expect("valid regex");

    entry_names
        .iter()
        .flat_map(|name| {
            asset_re
                .captures_iter(name)
                .chain(flutter_re.captures_iter(name))
                .map(|caps| caps[1].to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Snapshot-content heuristic: `package:` import URIs surviving in the AOT
/// snapshot or kernel blob. Non-UTF-8 snapshots are skipped.
fn snapshot_package_refs(archive: &mut ApkArchive, entry_names: &[String]) -> Vec<String> {
    let targets: Vec<String> = entry_names
        .iter()
        .filter(|name| {
            let base = name.rsplit('/').next().unwrap_or(name);
            SNAPSHOT_FILES.contains(&base)
        })
        .cloned()
        .collect();

    let mut found = Vec::new();
    for entry_name in targets {
        if let Some(text) = archive.read_text(&entry_name) {
            found.extend(package_uri_refs(&text));
        }
    }
    found
}

/// Asset-content heuristic: the same `package:` scan over every text asset.
fn asset_content_package_refs(archive: &mut ApkArchive, entry_names: &[String]) -> Vec<String> {
    let targets: Vec<String> = entry_names
        .iter()
        .filter(|name| name.starts_with("assets/") || name.starts_with("flutter_assets/"))
        .cloned()
        .collect();

    let mut found = Vec::new();
    for entry_name in targets {
        if let Some(text) = archive.read_text(&entry_name) {
            found.extend(package_uri_refs(&text));
        }
    }
    found
}

/// All non-overlapping `package:<name>/` references in a text blob
fn package_uri_refs(text: &str) -> Vec<String> {
    let re = Regex::new(r"package:([A-Za-z0-9_-]+)/").expect("valid regex");
    re.captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_asset_package_names_both_layouts() {
        let entries = names(&[
            "assets/packages/cupertino_icons/assets/CupertinoIcons.ttf",
            "flutter_assets/packages/font_awesome_flutter/lib/fonts/fa.ttf",
            "assets/flutter_assets/AssetManifest.json",
        ]);
        // both patterns can fire on a flutter_assets path; the set dedups
        let found: BTreeSet<String> = asset_package_names(&entries).into_iter().collect();
        assert!(found.contains("cupertino_icons"));
        assert!(found.contains("font_awesome_flutter"));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_package_uri_refs() {
        let text = "import 'package:http/http.dart'; export 'package:collection/collection.dart';";
        assert_eq!(package_uri_refs(text), vec!["http", "collection"]);
    }

    #[test]
    fn test_package_uri_refs_rejects_invalid_charset() {
        // a name with a dot never matches; the segment charset is alnum/_/-
        assert!(package_uri_refs("package:bad.name/x").is_empty());
    }

    #[test]
    fn test_merge_lockfile_wins_over_name_only() {
        let mut versioned = BTreeMap::new();
        versioned.insert("http".to_string(), "1.2.0".to_string());

        let mut name_only = BTreeSet::new();
        name_only.insert("http".to_string());
        name_only.insert("path_provider".to_string());

        let records = merge(versioned, name_only);
        assert_eq!(
            records,
            vec![
                PackageRecord::new("http", Some("1.2.0".to_string())),
                PackageRecord::new("path_provider", None),
            ]
        );
    }

    #[test]
    fn test_merge_output_is_name_sorted() {
        let mut name_only = BTreeSet::new();
        name_only.insert("zeta".to_string());
        name_only.insert("alpha".to_string());

        let records = merge(BTreeMap::new(), name_only);
        let ordered: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(ordered, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_extract_survives_unreadable_paths() {
        let records = extract(&[PathBuf::from("/nonexistent/base.apk")]);
        assert!(records.is_empty());
    }
}
