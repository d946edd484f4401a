//! Run reporting
//!
//! The engine describes what happens as [`FlattenEvent`]s; a [`Reporter`]
//! decides how to show them. Any `FnMut(&FlattenEvent)` closure is a
//! reporter too.

use std::path::Path;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};

use crate::errors::Error;
use crate::logging::format_message;
use crate::workflow::RunSummary;

/// Something that happened during a run
#[derive(Debug)]
pub enum FlattenEvent<'a> {
    /// The scan finished; counts are final
    ScanComplete {
        source: &'a Path,
        targets: usize,
        skipped: usize,
    },
    /// A regular file whose extension is not collected
    FileSkipped { path: &'a Path },
    /// Dry run: where a file would be copied
    FilePlanned {
        index: usize,
        total: usize,
        source: &'a Path,
        destination: &'a Path,
    },
    FileCopied {
        index: usize,
        total: usize,
        source: &'a Path,
        destination: &'a Path,
    },
    FileFailed {
        index: usize,
        total: usize,
        source: &'a Path,
        error: &'a Error,
    },
    /// The run is over
    Summary(&'a RunSummary),
}

/// Receives run events
pub trait Reporter {
    fn report(&mut self, event: &FlattenEvent<'_>);
}

impl<F> Reporter for F
where
    F: FnMut(&FlattenEvent<'_>),
{
    fn report(&mut self, event: &FlattenEvent<'_>) {
        self(event)
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&mut self, _event: &FlattenEvent<'_>) {}
}

/// Renders events as log records
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, event: &FlattenEvent<'_>) {
        match event {
            FlattenEvent::ScanComplete {
                source,
                targets,
                skipped,
            } => {
                info!(
                    "Scan complete: {targets} target files, {skipped} skipped in {}",
                    source.display()
                );
                if *targets == 0 {
                    info!("No target files found, nothing to copy");
                }
            }
            FlattenEvent::FileSkipped { path } => {
                debug!("Skipping {}", path.display());
            }
            FlattenEvent::FilePlanned {
                index,
                total,
                source,
                destination,
            } => {
                info!(
                    "[{index}/{total}] {} would be copied to {}",
                    source.display(),
                    destination.display()
                );
            }
            FlattenEvent::FileCopied {
                index,
                total,
                source,
                destination,
            } => {
                info!(
                    "[{index}/{total}] {} -> {}",
                    source.display(),
                    destination.display()
                );
            }
            FlattenEvent::FileFailed {
                index,
                total,
                source,
                error: cause,
            } => {
                error!("[{index}/{total}] {}: {cause}", source.display());
            }
            FlattenEvent::Summary(summary) => log_summary(summary),
        }
    }
}

/// Progress bar on the terminal, log records for everything else
///
/// Every event is passed on to the inner reporter, a [`LogReporter`] unless
/// [`ConsoleReporter::with_reporter`] picks another one. While the bar is
/// shown, per-file records are written with the bar suspended so both stay
/// readable.
#[derive(Default)]
pub struct ConsoleReporter<R = LogReporter> {
    show_progress: bool,
    bar: Option<ProgressBar>,
    inner: R,
}

impl ConsoleReporter {
    pub fn new(show_progress: bool) -> Self {
        ConsoleReporter::with_reporter(show_progress, LogReporter)
    }
}

impl<R: Reporter> ConsoleReporter<R> {
    pub fn with_reporter(show_progress: bool, inner: R) -> Self {
        ConsoleReporter {
            show_progress,
            bar: None,
            inner,
        }
    }

    fn start_bar(&mut self, total: usize) {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
        )
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        self.bar = Some(bar);
    }

    fn advance(bar: &ProgressBar, source: &Path) {
        let name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        bar.set_message(name);
        bar.inc(1);
    }
}

impl<R: Reporter> Reporter for ConsoleReporter<R> {
    fn report(&mut self, event: &FlattenEvent<'_>) {
        match event {
            FlattenEvent::ScanComplete { targets, .. } => {
                self.inner.report(event);
                if self.show_progress && *targets > 0 {
                    self.start_bar(*targets);
                }
            }
            FlattenEvent::FileCopied { source, .. }
            | FlattenEvent::FilePlanned { source, .. }
            | FlattenEvent::FileFailed { source, .. } => match &self.bar {
                Some(bar) => {
                    bar.suspend(|| self.inner.report(event));
                    Self::advance(bar, source);
                }
                None => self.inner.report(event),
            },
            FlattenEvent::Summary(_) => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
                self.inner.report(event);
            }
            FlattenEvent::FileSkipped { .. } => self.inner.report(event),
        }
    }
}

fn log_summary(summary: &RunSummary) {
    info!("{}", "-".repeat(40));
    if summary.dry_run {
        let plain = format!("Dry run: {} files planned", summary.stats.planned);
        let colored = format!(
            "Dry run: {} files planned",
            summary.stats.planned.to_string().cyan().bold()
        );
        info!("{}", format_message(&plain, &colored));
    } else {
        let plain = format!(
            "Finished: {} copied / {} failed",
            summary.success_count(),
            summary.error_count()
        );
        let failed = summary.error_count().to_string();
        let colored = format!(
            "Finished: {} copied / {} failed",
            summary.success_count().to_string().green().bold(),
            if summary.is_clean() {
                failed.normal()
            } else {
                failed.red().bold()
            }
        );
        info!("{}", format_message(&plain, &colored));
    }
    info!("Destination: {}", summary.destination.display());

    if !summary.skipped.is_empty() {
        info!("{}", "-".repeat(40));
        info!(
            "Skipped files ({}, extension not selected):",
            summary.skipped_count()
        );
        for path in &summary.skipped {
            info!("{}", path.display());
        }
    }

    if !summary.failures.is_empty() {
        warn!("Files that could not be copied:");
        for failure in &summary.failures {
            warn!("{}: {}", failure.source.display(), failure.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_closure_reporter_receives_events() {
        let mut seen = Vec::new();
        let mut reporter = |event: &FlattenEvent<'_>| {
            if let FlattenEvent::FileSkipped { path } = event {
                seen.push(path.to_path_buf());
            }
        };

        reporter.report(&FlattenEvent::FileSkipped {
            path: Path::new("notes.txt"),
        });
        reporter.report(&FlattenEvent::ScanComplete {
            source: Path::new("/src"),
            targets: 0,
            skipped: 1,
        });

        assert_eq!(seen, vec![PathBuf::from("notes.txt")]);
    }

    #[test]
    fn test_console_reporter_without_progress_bar() {
        let mut reporter = ConsoleReporter::new(false);
        reporter.report(&FlattenEvent::ScanComplete {
            source: Path::new("/src"),
            targets: 3,
            skipped: 0,
        });

        assert!(reporter.bar.is_none());
    }

    #[test]
    fn test_console_reporter_clears_bar_on_summary() {
        let mut reporter = ConsoleReporter::new(true);
        reporter.report(&FlattenEvent::ScanComplete {
            source: Path::new("/src"),
            targets: 1,
            skipped: 0,
        });
        assert!(reporter.bar.is_some());

        reporter.report(&FlattenEvent::FileCopied {
            index: 1,
            total: 1,
            source: Path::new("/src/a.xlsx"),
            destination: Path::new("/dst/a.xlsx"),
        });
        let summary = crate::workflow::WorkflowContext::new(
            Path::new("/src"),
            Path::new("/dst"),
            false,
        )
        .finish();
        reporter.report(&FlattenEvent::Summary(&summary));

        assert!(reporter.bar.is_none());
    }

    #[test]
    fn test_console_reporter_forwards_file_records_while_bar_is_shown() {
        let mut forwarded = Vec::new();
        {
            let recorder = |event: &FlattenEvent<'_>| match event {
                FlattenEvent::FilePlanned { destination, .. }
                | FlattenEvent::FileCopied { destination, .. } => {
                    forwarded.push(destination.to_path_buf());
                }
                _ => {}
            };
            let mut reporter = ConsoleReporter::with_reporter(true, recorder);
            reporter.report(&FlattenEvent::ScanComplete {
                source: Path::new("/src"),
                targets: 2,
                skipped: 0,
            });
            assert!(reporter.bar.is_some());

            reporter.report(&FlattenEvent::FilePlanned {
                index: 1,
                total: 2,
                source: Path::new("/src/dir1/file.xlsx"),
                destination: Path::new("/dst/dir1_file.xlsx"),
            });
            reporter.report(&FlattenEvent::FileCopied {
                index: 2,
                total: 2,
                source: Path::new("/src/deck.ppt"),
                destination: Path::new("/dst/deck.ppt"),
            });
            assert_eq!(reporter.bar.as_ref().map(|bar| bar.position()), Some(2));
        }

        assert_eq!(
            forwarded,
            vec![
                PathBuf::from("/dst/dir1_file.xlsx"),
                PathBuf::from("/dst/deck.ppt")
            ]
        );
    }
}
