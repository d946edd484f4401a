//! Workflow context
//!
//! This module defines the state a run accumulates and the summary it hands
//! back to the caller.

use std::path::{Path, PathBuf};

use crate::path_gen::PlannedCopy;

/// A file that could not be copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCopy {
    pub source: PathBuf,
    /// Destination the file was assigned, if naming got that far
    pub destination: Option<PathBuf>,
    /// Human-readable cause
    pub message: String,
}

/// Counters for one run
///
/// All counters only ever increase while the run is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of target files found by the scan
    pub targets: usize,
    /// Number of files copied
    pub copied: usize,
    /// Number of files that failed to copy
    pub failed: usize,
    /// Number of regular files whose extension was not selected
    pub skipped: usize,
    /// Number of files given a destination in a dry run
    pub planned: usize,
}

/// Final report of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Canonical source directory
    pub source: PathBuf,
    /// Resolved destination directory
    pub destination: PathBuf,
    pub dry_run: bool,
    pub stats: RunStats,
    pub copied: Vec<PlannedCopy>,
    pub planned: Vec<PlannedCopy>,
    pub failures: Vec<FailedCopy>,
    pub skipped: Vec<PathBuf>,
}

impl RunSummary {
    pub fn success_count(&self) -> usize {
        self.stats.copied
    }

    pub fn error_count(&self) -> usize {
        self.stats.failed
    }

    pub fn skipped_count(&self) -> usize {
        self.stats.skipped
    }

    /// Whether every target was handled without a failure
    pub fn is_clean(&self) -> bool {
        self.stats.failed == 0
    }
}

/// Mutable state of a run in progress
#[derive(Debug, Clone)]
pub struct WorkflowContext {
    summary: RunSummary,
}

impl WorkflowContext {
    /// Creates a context with empty counters
    pub fn new(source: &Path, destination: &Path, dry_run: bool) -> Self {
        WorkflowContext {
            summary: RunSummary {
                source: source.to_path_buf(),
                destination: destination.to_path_buf(),
                dry_run,
                stats: RunStats::default(),
                copied: Vec::new(),
                planned: Vec::new(),
                failures: Vec::new(),
                skipped: Vec::new(),
            },
        }
    }

    /// Records the resolved roots once the preconditions have passed
    pub fn set_roots(&mut self, source: PathBuf, destination: PathBuf) {
        self.summary.source = source;
        self.summary.destination = destination;
    }

    pub fn set_target_count(&mut self, targets: usize) {
        self.summary.stats.targets = targets;
    }

    pub fn record_skipped(&mut self, path: PathBuf) {
        self.summary.stats.skipped += 1;
        self.summary.skipped.push(path);
    }

    pub fn record_copied(&mut self, copy: PlannedCopy) {
        self.summary.stats.copied += 1;
        self.summary.copied.push(copy);
    }

    pub fn record_planned(&mut self, copy: PlannedCopy) {
        self.summary.stats.planned += 1;
        self.summary.planned.push(copy);
    }

    pub fn record_failure(&mut self, failure: FailedCopy) {
        self.summary.stats.failed += 1;
        self.summary.failures.push(failure);
    }

    /// Hands back the summary of the finished run
    pub fn finish(self) -> RunSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut context = WorkflowContext::new(Path::new("/src"), Path::new("/dst"), false);

        context.set_target_count(2);
        context.record_skipped(PathBuf::from("/src/notes.txt"));
        context.record_copied(PlannedCopy {
            source: PathBuf::from("/src/a.xlsx"),
            destination: PathBuf::from("/dst/a.xlsx"),
        });
        context.record_failure(FailedCopy {
            source: PathBuf::from("/src/b.xlsx"),
            destination: Some(PathBuf::from("/dst/b.xlsx")),
            message: "Permission denied".to_string(),
        });

        let summary = context.finish();
        assert_eq!(summary.stats.targets, 2);
        assert_eq!(summary.success_count(), 1);
        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.skipped_count(), 1);
        assert!(!summary.is_clean());
        assert_eq!(summary.skipped, vec![PathBuf::from("/src/notes.txt")]);
    }
}
