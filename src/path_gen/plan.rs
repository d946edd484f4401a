//! Complete name-to-destination plans
//!
//! Naming every file before anything is copied yields a fixed mapping that
//! can be shown to the user (dry run) or handed to a copier that does not
//! need to name files itself.

use std::path::PathBuf;

use crate::discovery::FileEntry;
use crate::errors::Result;
use crate::path_gen::Namer;

/// A scanned file paired with the destination it will be copied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Assigns a destination to every target, in order
///
/// Uses the same registry as interleaved naming, so the plan matches what a
/// real run would produce against the same destination contents.
pub fn plan_destinations(targets: &[FileEntry], namer: &mut Namer) -> Result<Vec<PlannedCopy>> {
    targets
        .iter()
        .map(|entry| {
            Ok(PlannedCopy {
                source: entry.path.clone(),
                destination: namer.assign(entry)?,
            })
        })
        .collect()
}
