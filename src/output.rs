//! Console output for a batch run

use std::io::Write;
use std::path::Path;
use crate::rename::{FileEntry, ProgressSink, RenameOutcome, RenameStatus, Report};

/// Writes human-readable progress lines to `W`.
pub struct ConsolePrinter<W: Write> {
    out: W,
}

impl<W: Write> ConsolePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            log::warn!("Failed to write output: {}", e);
        }
    }

    fn listing(&mut self, title: &str, names: &[String]) {
        self.line(format_args!("\n{}:", title));
        if names.is_empty() {
            self.line(format_args!("  (none)"));
        }
        for name in names {
            self.line(format_args!("  {}", name));
        }
    }
}

impl ConsolePrinter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

pub fn format_outcome(outcome: &RenameOutcome) -> String {
    match outcome.status {
        RenameStatus::Renamed => {
            format!("✅ {} → {}", outcome.original_name, outcome.sanitized_name)
        }
        RenameStatus::Unchanged => format!("ℹ️ {} (no change needed)", outcome.original_name),
        RenameStatus::SkippedConflict => format!(
            "⚠️ {} skipped, destination already exists: {}",
            outcome.original_name, outcome.sanitized_name
        ),
        RenameStatus::Failed => format!(
            "❌ Failed to rename {}: {}",
            outcome.original_name,
            outcome.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

impl<W: Write> ProgressSink for ConsolePrinter<W> {
    fn on_start(&mut self, directory: &Path) {
        let shown = std::path::absolute(directory).unwrap_or_else(|_| directory.to_path_buf());
        self.line(format_args!("📁 Working in: {}", shown.display()));
    }

    fn on_scan(&mut self, entries: &[FileEntry]) {
        let names: Vec<String> = entries.iter().map(|e| e.original_name.clone()).collect();
        self.listing("Current files", &names);
        self.line(format_args!("\nProcessing renames..."));
    }

    fn on_outcome(&mut self, outcome: &RenameOutcome) {
        let text = format_outcome(outcome);
        self.line(format_args!("{}", text));
    }

    fn on_complete(&mut self, report: &Report) {
        let s = &report.summary;
        self.line(format_args!("\nDone! {} of {} files renamed.", s.renamed, s.total()));
        if s.skipped_conflict > 0 || s.failed > 0 {
            self.line(format_args!("{} skipped (conflict), {} failed.", s.skipped_conflict, s.failed));
        }
        self.listing("Files after renaming", &report.final_listing);
    }
}
