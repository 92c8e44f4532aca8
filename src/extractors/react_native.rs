//! Package extraction for React Native applications
//!
//! The JS bundle carries no version metadata, so every observation is
//! name-only. Four scans run over the bundle text; relative module paths and
//! the framework's own `react-native*` modules are filtered out of the
//! require/import/registration scans. Scoped `@org/name` tokens are taken
//! verbatim, the form is unambiguous.

use crate::archive::ApkArchive;
use crate::detection::types::PackageRecord;
use crate::extractors::common::{native_lib_names, signature_file_names};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::warn;

const BUNDLE_ENTRY: &str = "assets/index.android.bundle";

/// Extracts bundled packages from an application already classified as
/// React Native. Unreadable splits contribute nothing.
pub fn extract(archive_paths: &[PathBuf]) -> Vec<PackageRecord> {
    let mut packages: BTreeSet<String> = BTreeSet::new();

    for path in archive_paths {
        let mut archive = match ApkArchive::open(path) {
            Ok(a) => a,
            Err(e) => {
                warn!(archive = %path.display(), error = %e, "skipping unreadable archive during extraction");
                continue;
            }
        };

        if let Some(bundle) = archive.read_text(BUNDLE_ENTRY) {
            packages.extend(bundle_module_specs(&bundle));
        }

        // packaging-level evidence, independent of bundle presence
        let entry_names: Vec<String> = archive.entry_names().to_vec();
        packages.extend(native_lib_names(&entry_names));
        packages.extend(signature_file_names(&entry_names));
    }

    packages
        .into_iter()
        .map(|name| PackageRecord::new(name, None))
        .collect()
}

/// All module specifiers referenced by the bundle text
fn bundle_module_specs(bundle: &str) -> BTreeSet<String> {
    let require_re = Regex::new(r#"require\(['"]([^'"]+)['"]\)"#).expect("valid regex");
    let import_re = Regex::new(r#"from ['"]([^'"]+)['"]"#).expect("valid regex");
    let define_re = Regex::new(r#"__d\(['"]([^'"]+)['"]"#).expect("valid regex");
    let scoped_re = Regex::new(r"@([A-Za-z0-9_-]+)/([A-Za-z0-9_-]+)").expect("valid regex");

    let mut specs = BTreeSet::new();

    for re in [&require_re, &import_re, &define_re] {
        specs.extend(
            re.captures_iter(bundle)
                .map(|caps| caps[1].to_string())
                .filter(|spec| is_external_spec(spec)),
        );
    }

    // no exclusion filter here: the scoped form cannot be a relative path
    specs.extend(scoped_re.find_iter(bundle).map(|m| m.as_str().to_string()));

    specs
}

/// Rejects relative/local module references and the framework itself
fn is_external_spec(spec: &str) -> bool {
    !(spec.starts_with("./")
        || spec.starts_with("../")
        || spec.starts_with('/')
        || spec.starts_with("react-native"))
}
