//! Zip container access for installed application artifacts
//!
//! An application on device ships as one base APK plus zero or more split APKs.
//! Each path is treated as an independent zip container; splits are never merged
//! into a single virtual filesystem. Reads are lazy: opening an archive lists
//! entry names only, content is decompressed per entry on demand.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

/// Errors that can occur opening an installation archive
///
/// Both variants are recoverable at the orchestration layer: a split that
/// fails to open simply contributes no evidence.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The file exists but is not a valid zip container
    #[error("not a zip archive: {path}")]
    NotAZip { path: PathBuf },

    /// The file is missing or could not be read
    #[error("failed to read archive {path}: {message}")]
    Unreadable { path: PathBuf, message: String },
}

/// One opened APK (base or split), holding the zip central directory
#[derive(Debug)]
pub struct ApkArchive {
    path: PathBuf,
    zip: ZipArchive<File>,
    entry_names: Vec<String>,
}

impl ApkArchive {
    /// Opens an archive and reads its central directory.
    ///
    /// Entry names are captured in stored order so later scans are
    /// deterministic regardless of how the zip index is organized internally.
    pub fn open(path: &Path) -> Result<ApkArchive, ArchiveError> {
        let file = File::open(path).map_err(|e| ArchiveError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let zip = ZipArchive::new(file).map_err(|e| match e {
            ZipError::Io(io) => ArchiveError::Unreadable {
                path: path.to_path_buf(),
                message: io.to_string(),
            },
            other => {
                debug!(path = %path.display(), error = %other, "rejecting non-zip file");
                ArchiveError::NotAZip {
                    path: path.to_path_buf(),
                }
            }
        })?;

        let entry_names: Vec<String> = (0..zip.len())
            .filter_map(|i| zip.name_for_index(i))
            .map(|name| name.to_string())
            .collect();

        Ok(ApkArchive {
            path: path.to_path_buf(),
            zip,
            entry_names,
        })
    }

    /// Path this archive was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry names in stored order
    pub fn entry_names(&self) -> &[String] {
        &self.entry_names
    }

    /// Reads an entry as raw bytes, or `None` if the entry is absent or
    /// fails to decompress. Per-entry failures are non-fatal.
    pub fn read_bytes(&mut self, entry_name: &str) -> Option<Vec<u8>> {
        let mut entry = self.zip.by_name(entry_name).ok()?;
        let mut buf = Vec::with_capacity(entry.size() as usize);
        match entry.read_to_end(&mut buf) {
            Ok(_) => Some(buf),
            Err(e) => {
                debug!(
                    archive = %self.path.display(),
                    entry = entry_name,
                    error = %e,
                    "entry read failed"
                );
                None
            }
        }
    }

    /// Reads an entry as UTF-8 text, or `None` if the entry is absent,
    /// fails to decompress, or is not valid UTF-8.
    pub fn read_text(&mut self, entry_name: &str) -> Option<String> {
        let bytes = self.read_bytes(entry_name)?;
        String::from_utf8(bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_fixture(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (entry_name, content) in entries {
            writer.start_file(*entry_name, options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_open_lists_entries_in_stored_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "app.apk",
            &[
                ("zebra.txt", b"z".as_slice()),
                ("alpha.txt", b"a".as_slice()),
                ("assets/data.bin", b"d".as_slice()),
            ],
        );

        let archive = ApkArchive::open(&path).unwrap();
        assert_eq!(
            archive.entry_names(),
            &["zebra.txt", "alpha.txt", "assets/data.bin"]
        );
    }

    #[test]
    fn test_read_text_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "app.apk",
            &[("assets/note.txt", "hello".as_bytes())],
        );

        let mut archive = ApkArchive::open(&path).unwrap();
        assert_eq!(archive.read_text("assets/note.txt").as_deref(), Some("hello"));
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "app.apk",
            &[("blob.bin", &[0xff, 0xfe, 0x00, 0x01][..])],
        );

        let mut archive = ApkArchive::open(&path).unwrap();
        assert!(archive.read_text("blob.bin").is_none());
        assert_eq!(archive.read_bytes("blob.bin"), Some(vec![0xff, 0xfe, 0x00, 0x01]));
    }

    #[test]
    fn test_read_absent_entry_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "app.apk", &[("present.txt", b"x".as_slice())]);

        let mut archive = ApkArchive::open(&path).unwrap();
        assert!(archive.read_text("missing.txt").is_none());
        assert!(archive.read_bytes("missing.txt").is_none());
    }

    #[test]
    fn test_open_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = ApkArchive::open(&dir.path().join("nope.apk")).unwrap_err();
        assert!(matches!(err, ArchiveError::Unreadable { .. }));
    }

    #[test]
    fn test_open_non_zip_is_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.apk");
        std::fs::write(&path, b"this is not a zip file at all").unwrap();

        let err = ApkArchive::open(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::NotAZip { .. }));
    }
}
