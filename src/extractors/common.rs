//! Entry-name heuristics shared by the framework extractors
//!
//! Native libraries and signing-block signature files are packaging-level
//! evidence that applies regardless of UI framework, so both extractors run
//! these scans with the same patterns.

use regex::Regex;

/// Captures `<segment>` from every entry name matching `lib/<abi>/lib<segment>.so`.
pub fn native_lib_names(entry_names: &[String]) -> Vec<String> {
    let re = Regex::new(r"lib/[^/]+/lib([A-Za-z0-9_-]+)\.so").expect("valid regex");
    entry_names
        .iter()
        .filter_map(|name| re.captures(name))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Captures `<segment>` from every entry name matching `META-INF/<segment>.SF`.
pub fn signature_file_names(entry_names: &[String]) -> Vec<String> {
    let re = Regex::new(r"META-INF/([A-Za-z0-9_-]+)\.SF").expect("valid regex");
    entry_names
        .iter()
        .filter_map(|name| re.captures(name))
        .map(|caps| caps[1].to_string())
        .collect()
}
