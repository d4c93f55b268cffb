//! Directory scanning with a single-suffix extension filter

use std::fs;
use std::path::{Path, PathBuf};
use crate::config::FilterConfig;
use crate::error::{RenameError, Result};

/// Matches file names ending in `.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffix: String,
    case_sensitive: bool,
}

impl ExtensionFilter {
    pub fn new(extension: &str, case_sensitive: bool) -> Self {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        let suffix = format!(".{}", extension);
        let suffix = if case_sensitive { suffix } else { suffix.to_lowercase() };
        Self { suffix, case_sensitive }
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.case_sensitive {
            name.ends_with(&self.suffix)
        } else {
            name.to_lowercase().ends_with(&self.suffix)
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl From<&FilterConfig> for ExtensionFilter {
    fn from(config: &FilterConfig) -> Self {
        Self::new(&config.extension, config.case_sensitive)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub original_name: String,
    pub resolved_path: PathBuf,
}

/// Fails if `directory` is missing or is not a directory.
pub fn ensure_directory(directory: &Path) -> Result<()> {
    match fs::metadata(directory) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(RenameError::NotADirectory { path: directory.to_path_buf() }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RenameError::DirectoryNotFound { path: directory.to_path_buf() })
        }
        Err(e) => Err(e.into()),
    }
}

/// List the entries of `directory` whose names pass `filter`.
///
/// Non-recursive. Directories are never returned, and names that are not
/// valid UTF-8 are skipped. The result is sorted by name so that a run is
/// reproducible regardless of the filesystem's listing order.
pub fn scan(directory: &Path, filter: &ExtensionFilter) -> Result<Vec<FileEntry>> {
    ensure_directory(directory)?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        let original_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                log::warn!("Skipping non UTF-8 file name: {:?}", raw);
                continue;
            }
        };

        if filter.matches(&original_name) {
            entries.push(FileEntry {
                original_name,
                resolved_path: entry.path(),
            });
        }
    }

    entries.sort_by(|a, b| a.original_name.cmp(&b.original_name));
    log::debug!(
        "Scanned {} for *{}: {} matching entries",
        directory.display(),
        filter.suffix(),
        entries.len()
    );
    Ok(entries)
}
