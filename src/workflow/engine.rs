//! Workflow engine
//!
//! This module runs the scan, naming and copy steps over one source tree.

use std::path::PathBuf;

use log::debug;

use crate::discovery::{TargetExtensions, check_roots, scan_directory};
use crate::errors::Result;
use crate::file_ops::{copy_file, ensure_destination};
use crate::path_gen::{Namer, PlannedCopy, plan_destinations};

use super::context::{FailedCopy, RunSummary, WorkflowContext};
use super::reporter::{FlattenEvent, Reporter};

/// Everything a run needs, resolved ahead of time by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Directory to collect files from
    pub source: PathBuf,
    /// Directory the flattened copies are written to
    pub destination: PathBuf,
    /// Extensions selected for collection
    pub extensions: TargetExtensions,
    /// Name every file but do not create or copy anything
    pub dry_run: bool,
}

impl FlattenOptions {
    /// Options with the default extension set and no dry run
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        FlattenOptions {
            source: source.into(),
            destination: destination.into(),
            extensions: TargetExtensions::default(),
            dry_run: false,
        }
    }

    pub fn with_extensions(mut self, extensions: TargetExtensions) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Copies every target file below the source into the flat destination
///
/// Steps:
/// 1. Check the source exists, is a directory and differs from the
///    destination. Nothing is created when a check fails.
/// 2. Scan the whole source tree so the totals are known upfront.
/// 3. Create the destination.
/// 4. For each target in scan order, assign a free name and copy the file.
///    A failed copy is recorded and the loop moves on.
///
/// In a dry run step 3 is skipped and step 4 only assigns names.
///
/// # Errors
/// * `SourceNotFound`, `SourceNotDirectory` or `SourceEqualsDestination`
///   when a precondition fails
/// * `FileOperation` when the destination cannot be created
pub fn flatten_directory<R>(options: &FlattenOptions, reporter: &mut R) -> Result<RunSummary>
where
    R: Reporter + ?Sized,
{
    let mut context = WorkflowContext::new(&options.source, &options.destination, options.dry_run);
    let roots = check_roots(&options.source, &options.destination)?;
    context.set_roots(roots.source.clone(), roots.destination.clone());

    let scan = scan_directory(&roots.source, &options.extensions, roots.nested_destination());
    let total = scan.targets.len();
    context.set_target_count(total);

    reporter.report(&FlattenEvent::ScanComplete {
        source: &roots.source,
        targets: total,
        skipped: scan.skipped.len(),
    });
    for file in scan.skipped {
        reporter.report(&FlattenEvent::FileSkipped { path: &file.path });
        context.record_skipped(file.path);
    }

    let mut namer = Namer::new(&roots.destination);

    if options.dry_run {
        let plan = plan_destinations(&scan.targets, &mut namer)?;
        for (position, planned) in plan.into_iter().enumerate() {
            reporter.report(&FlattenEvent::FilePlanned {
                index: position + 1,
                total,
                source: &planned.source,
                destination: &planned.destination,
            });
            context.record_planned(planned);
        }
    } else {
        ensure_destination(&roots.destination)?;

        for (position, entry) in scan.targets.iter().enumerate() {
            let index = position + 1;
            let destination = match namer.assign(entry) {
                Ok(destination) => destination,
                Err(e) => {
                    reporter.report(&FlattenEvent::FileFailed {
                        index,
                        total,
                        source: &entry.path,
                        error: &e,
                    });
                    context.record_failure(FailedCopy {
                        source: entry.path.clone(),
                        destination: None,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            match copy_file(&entry.path, &destination) {
                Ok(()) => {
                    reporter.report(&FlattenEvent::FileCopied {
                        index,
                        total,
                        source: &entry.path,
                        destination: &destination,
                    });
                    context.record_copied(PlannedCopy {
                        source: entry.path.clone(),
                        destination,
                    });
                }
                Err(e) => {
                    reporter.report(&FlattenEvent::FileFailed {
                        index,
                        total,
                        source: &entry.path,
                        error: &e,
                    });
                    context.record_failure(FailedCopy {
                        source: entry.path.clone(),
                        destination: Some(destination),
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    let summary = context.finish();
    debug!(
        "Run finished: {} copied, {} failed, {} skipped",
        summary.success_count(),
        summary.error_count(),
        summary.skipped_count()
    );
    reporter.report(&FlattenEvent::Summary(&summary));

    Ok(summary)
}
