//! Shared fixture helpers for integration tests

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds a zip archive fixture with the given entries, in order.
pub fn build_apk(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("create fixture file");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (entry_name, content) in entries {
        writer.start_file(*entry_name, options).expect("start entry");
        writer.write_all(content).expect("write entry");
    }
    writer.finish().expect("finish archive");
    path
}

/// Writes a deliberately corrupt, non-zip file.
#[allow(dead_code)]
pub fn build_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"definitely not a zip container").expect("write garbage file");
    path
}
