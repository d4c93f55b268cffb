//! Per-entry outcomes and the run report

use std::fmt;
use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::error::{RenameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameStatus {
    Renamed,
    Unchanged,
    SkippedConflict,
    Failed,
}

impl fmt::Display for RenameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Renamed => "renamed",
            Self::Unchanged => "unchanged",
            Self::SkippedConflict => "skipped_conflict",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOutcome {
    pub original_name: String,
    pub sanitized_name: String,
    pub status: RenameStatus,
    /// Cause of a `Failed` or `SkippedConflict` outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RenameOutcome {
    pub fn renamed(original_name: String, sanitized_name: String) -> Self {
        Self { original_name, sanitized_name, status: RenameStatus::Renamed, error: None }
    }

    pub fn unchanged(name: String) -> Self {
        Self {
            sanitized_name: name.clone(),
            original_name: name,
            status: RenameStatus::Unchanged,
            error: None,
        }
    }

    /// Build the outcome for a rename that did not happen.
    pub fn from_error(original_name: String, sanitized_name: String, err: &RenameError) -> Self {
        let status = match err {
            RenameError::DestinationConflict { .. } => RenameStatus::SkippedConflict,
            _ => RenameStatus::Failed,
        };
        Self { original_name, sanitized_name, status, error: Some(err.to_string()) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped_conflict: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[RenameOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.status {
                RenameStatus::Renamed => summary.renamed += 1,
                RenameStatus::Unchanged => summary.unchanged += 1,
                RenameStatus::SkippedConflict => summary.skipped_conflict += 1,
                RenameStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.renamed + self.unchanged + self.skipped_conflict + self.failed
    }
}

/// Result of one batch run.
///
/// `final_listing` comes from a fresh scan after the batch, not from the
/// outcomes, so it shows whatever is actually on disk.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub directory: PathBuf,
    pub initial_listing: Vec<String>,
    pub final_listing: Vec<String>,
    pub summary: Summary,
    pub outcomes: Vec<RenameOutcome>,
}

impl Report {
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    pub fn outcome_for(&self, original_name: &str) -> Option<&RenameOutcome> {
        self.outcomes.iter().find(|o| o.original_name == original_name)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RenameError::config(format!("Failed to serialize report: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
