//! Batch renamer

use std::path::Path;
use crate::config::Config;
use crate::error::{RenameError, Result};
use crate::rename::fs_ops;
use crate::rename::outcome::{RenameOutcome, Report, Summary};
use crate::rename::scanner::{self, ExtensionFilter, FileEntry};
use crate::sanitize::{needs_sanitizing, sanitize};

/// Receives progress as the batch runs.
pub trait ProgressSink {
    fn on_start(&mut self, _directory: &Path) {}
    fn on_scan(&mut self, _entries: &[FileEntry]) {}
    fn on_outcome(&mut self, _outcome: &RenameOutcome) {}
    fn on_complete(&mut self, _report: &Report) {}
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {}

#[derive(Debug)]
pub struct BatchRenamer {
    config: Config,
    filter: ExtensionFilter,
}

impl BatchRenamer {
    pub fn new(config: Config) -> Self {
        let filter = ExtensionFilter::from(&config.filter);
        Self { config, filter }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rename every matching file in the configured directory.
    ///
    /// Only directory-level problems are returned as errors, and they happen
    /// before anything is renamed. Per-file problems become outcomes. If the
    /// final listing cannot be read the report is still returned, with an
    /// empty `final_listing`.
    pub fn run(&self, sink: &mut dyn ProgressSink) -> Result<Report> {
        let directory = self.config.directory();
        scanner::ensure_directory(directory)?;
        sink.on_start(directory);

        let entries = scanner::scan(directory, &self.filter)?;
        log::info!("Found {} files in {}", entries.len(), directory.display());
        sink.on_scan(&entries);

        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in &entries {
            let outcome = self.process_entry(directory, entry);
            sink.on_outcome(&outcome);
            outcomes.push(outcome);
        }

        let final_entries = scanner::scan(directory, &self.filter).unwrap_or_else(|e| {
            log::error!("Failed to list {} after renaming: {}", directory.display(), e);
            Vec::new()
        });

        let report = Report {
            directory: directory.to_path_buf(),
            initial_listing: names(&entries),
            final_listing: names(&final_entries),
            summary: Summary::from_outcomes(&outcomes),
            outcomes,
        };
        log::info!(
            "Batch complete: {} renamed, {} unchanged, {} conflicts, {} failed",
            report.summary.renamed,
            report.summary.unchanged,
            report.summary.skipped_conflict,
            report.summary.failed
        );
        sink.on_complete(&report);

        Ok(report)
    }

    fn process_entry(&self, directory: &Path, entry: &FileEntry) -> RenameOutcome {
        let original = entry.original_name.clone();
        if !needs_sanitizing(&original) {
            log::debug!("{}: unchanged", original);
            return RenameOutcome::unchanged(original);
        }
        let sanitized = sanitize(&original);

        match rename_entry(directory, entry, &sanitized) {
            Ok(()) => {
                log::debug!("{} -> {}", original, sanitized);
                RenameOutcome::renamed(original, sanitized)
            }
            Err(e) => {
                log::debug!("{}: {}", original, e);
                RenameOutcome::from_error(original, sanitized, &e)
            }
        }
    }
}

/// Check the destination against the live filesystem, then rename.
fn rename_entry(directory: &Path, entry: &FileEntry, sanitized: &str) -> Result<()> {
    let destination = directory.join(sanitized);
    if fs_ops::occupied(&destination) {
        return Err(RenameError::DestinationConflict { path: destination });
    }

    fs_ops::rename_no_replace(&entry.resolved_path, &destination).map_err(|source| {
        RenameError::RenameFailed {
            original: entry.original_name.clone(),
            sanitized: sanitized.to_string(),
            source,
        }
    })
}

fn names(entries: &[FileEntry]) -> Vec<String> {
    entries.iter().map(|e| e.original_name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::outcome::RenameStatus;
    use std::fs;
    use tempfile::TempDir;

    fn setup(names: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for name in names {
            fs::write(temp_dir.path().join(name), name.as_bytes()).unwrap();
        }
        temp_dir
    }

    fn renamer_for(dir: &Path) -> BatchRenamer {
        BatchRenamer::new(Config { directory: dir.to_path_buf(), ..Default::default() })
    }

    fn status_of(report: &Report, name: &str) -> RenameStatus {
        report.outcome_for(name).unwrap().status
    }

    #[derive(Default)]
    struct Recorder {
        scanned: usize,
        outcomes: Vec<RenameStatus>,
        completed: bool,
    }

    impl ProgressSink for Recorder {
        fn on_scan(&mut self, entries: &[FileEntry]) {
            self.scanned = entries.len();
        }
        fn on_outcome(&mut self, outcome: &RenameOutcome) {
            self.outcomes.push(outcome.status);
        }
        fn on_complete(&mut self, _report: &Report) {
            self.completed = true;
        }
    }

    #[test]
    fn test_renames_accented_file() {
        let dir = setup(&["música.mp3"]);
        let report = renamer_for(dir.path()).run(&mut NullSink).unwrap();

        assert_eq!(status_of(&report, "música.mp3"), RenameStatus::Renamed);
        assert!(dir.path().join("musica.mp3").exists());
        assert!(!dir.path().join("música.mp3").exists());
        assert_eq!(report.final_listing, vec!["musica.mp3"]);
        assert_eq!(fs::read(dir.path().join("musica.mp3")).unwrap(), "música.mp3".as_bytes());
    }

    #[test]
    fn test_plain_file_unchanged() {
        let dir = setup(&["song.mp3"]);
        let report = renamer_for(dir.path()).run(&mut NullSink).unwrap();

        assert_eq!(status_of(&report, "song.mp3"), RenameStatus::Unchanged);
        assert!(dir.path().join("song.mp3").exists());
        assert_eq!(report.summary.renamed, 0);
    }

    #[test]
    fn test_conflict_is_skipped() {
        let dir = setup(&["café.mp3", "cafe.mp3"]);
        let report = renamer_for(dir.path()).run(&mut NullSink).unwrap();

        assert_eq!(status_of(&report, "café.mp3"), RenameStatus::SkippedConflict);
        assert_eq!(status_of(&report, "cafe.mp3"), RenameStatus::Unchanged);
        assert_eq!(fs::read(dir.path().join("cafe.mp3")).unwrap(), b"cafe.mp3");
        assert!(dir.path().join("café.mp3").exists());
        assert!(!report.has_failures());
    }

    #[test]
    fn test_missing_directory_fails_fast() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("public/audio");
        let mut recorder = Recorder::default();

        let err = renamer_for(&missing).run(&mut recorder).unwrap_err();
        assert!(matches!(err, RenameError::DirectoryNotFound { .. }));
        assert!(recorder.outcomes.is_empty());
        assert!(!missing.exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_case_variants_do_not_conflict() {
        let dir = setup(&["açaí.mp3", "AÇAÍ.mp3"]);
        let report = renamer_for(dir.path()).run(&mut NullSink).unwrap();

        assert_eq!(status_of(&report, "açaí.mp3"), RenameStatus::Renamed);
        assert_eq!(status_of(&report, "AÇAÍ.mp3"), RenameStatus::Renamed);
        assert_eq!(report.final_listing, vec!["ACAI.mp3", "acai.mp3"]);
    }

    #[test]
    fn test_two_sources_same_target() {
        // "cafè" sorts before "café", so it wins the name
        let dir = setup(&["café.mp3", "cafè.mp3"]);
        let report = renamer_for(dir.path()).run(&mut NullSink).unwrap();

        assert_eq!(status_of(&report, "cafè.mp3"), RenameStatus::Renamed);
        assert_eq!(status_of(&report, "café.mp3"), RenameStatus::SkippedConflict);
        assert_eq!(fs::read(dir.path().join("cafe.mp3")).unwrap(), "cafè.mp3".as_bytes());
        assert_eq!(report.final_listing, vec!["cafe.mp3", "café.mp3"]);
    }

    #[test]
    fn test_other_extensions_ignored() {
        let dir = setup(&["canção.wav", "canção.MP3"]);
        let report = renamer_for(dir.path()).run(&mut NullSink).unwrap();
        assert!(report.outcomes.is_empty());
        assert!(dir.path().join("canção.wav").exists());

        let mut config = Config { directory: dir.path().to_path_buf(), ..Default::default() };
        config.filter.case_sensitive = false;
        let report = BatchRenamer::new(config).run(&mut NullSink).unwrap();
        assert_eq!(status_of(&report, "canção.MP3"), RenameStatus::Renamed);
        assert!(dir.path().join("cancao.MP3").exists());
    }

    #[test]
    fn test_sink_sees_every_phase() {
        let dir = setup(&["á.mp3", "b.mp3"]);
        let mut recorder = Recorder::default();
        renamer_for(dir.path()).run(&mut recorder).unwrap();

        assert_eq!(recorder.scanned, 2);
        assert_eq!(recorder.outcomes, vec![RenameStatus::Unchanged, RenameStatus::Renamed]);
        assert!(recorder.completed);
    }

    #[test]
    fn test_second_run_is_noop() {
        let dir = setup(&["Coração.mp3", "ñandú.mp3"]);
        let renamer = renamer_for(dir.path());
        renamer.run(&mut NullSink).unwrap();

        let report = renamer.run(&mut NullSink).unwrap();
        assert_eq!(report.summary.unchanged, 2);
        assert_eq!(report.summary.renamed, 0);
    }

    /// Removes the first scanned file so its rename fails.
    struct DeleteFirst;

    impl ProgressSink for DeleteFirst {
        fn on_scan(&mut self, entries: &[FileEntry]) {
            fs::remove_file(&entries[0].resolved_path).unwrap();
        }
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let dir = setup(&["á.mp3", "é.mp3"]);
        let report = renamer_for(dir.path()).run(&mut DeleteFirst).unwrap();

        let failed = report.outcome_for("á.mp3").unwrap();
        assert_eq!(failed.status, RenameStatus::Failed);
        assert!(failed.error.as_deref().unwrap().contains("á.mp3 -> a.mp3"));
        assert_eq!(status_of(&report, "é.mp3"), RenameStatus::Renamed);
        assert!(report.has_failures());
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.renamed, 1);
        assert_eq!(report.final_listing, vec!["e.mp3"]);
    }

    /// Removes the whole directory once the last file is handled.
    struct RemoveDirAfter {
        directory: std::path::PathBuf,
        completed: bool,
    }

    impl ProgressSink for RemoveDirAfter {
        fn on_outcome(&mut self, _outcome: &RenameOutcome) {
            fs::remove_dir_all(&self.directory).unwrap();
        }
        fn on_complete(&mut self, _report: &Report) {
            self.completed = true;
        }
    }

    #[test]
    fn test_outcomes_survive_unreadable_final_listing() {
        let temp_dir = setup(&[]);
        let dir = temp_dir.path().join("audio");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("ó.mp3"), b"").unwrap();

        let mut sink = RemoveDirAfter { directory: dir.clone(), completed: false };
        let report = renamer_for(&dir).run(&mut sink).unwrap();

        assert!(sink.completed);
        assert_eq!(status_of(&report, "ó.mp3"), RenameStatus::Renamed);
        assert_eq!(report.initial_listing, vec!["ó.mp3"]);
        assert!(report.final_listing.is_empty());
    }
}
