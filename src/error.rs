//! Error Types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Destination already exists: {}", path.display())]
    DestinationConflict { path: PathBuf },

    #[error("Failed to rename {original} -> {sanitized}: {source}")]
    RenameFailed {
        original: String,
        sanitized: String,
        #[source]
        source: io::Error,
    },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RenameError {
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }

    /// Whether the error means the target directory is unusable.
    pub fn is_directory_error(&self) -> bool {
        matches!(self, Self::DirectoryNotFound { .. } | Self::NotADirectory { .. })
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;
