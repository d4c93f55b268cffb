//! Batch Rename Module
//!
//! Scans a directory for matching files, sanitizes their names and renames
//! them in place, collecting one outcome per file.

pub mod fs_ops;
pub mod outcome;
pub mod renamer;
pub mod scanner;

pub use outcome::{RenameOutcome, RenameStatus, Report, Summary};
pub use renamer::{BatchRenamer, NullSink, ProgressSink};
pub use scanner::{scan, ExtensionFilter, FileEntry};
