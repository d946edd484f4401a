//! File copy functionality
//!
//! Copies keep the source's permissions and access/modification times and
//! never replace an existing destination entry.

use std::fs::{self, create_dir_all};
use std::io;
use std::path::Path;

use filetime::{FileTime, set_file_times};
use fs_extra::file::{CopyOptions, copy};
use log::{debug, trace, warn};

use crate::errors::{Result, copy_failure_error, file_operation_error};

/// Creates the destination directory and any missing parents
///
/// Succeeds when the directory already exists.
pub fn ensure_destination(directory: &Path) -> Result<()> {
    create_dir_all(directory)
        .map_err(|e| file_operation_error(e, directory.to_path_buf(), "create directory"))?;
    debug!("Destination ready: {}", directory.display());
    Ok(())
}

/// Copies one file into place, failing rather than overwriting
///
/// # Errors
/// Returns a `CopyFailure` carrying the source, the destination and the
/// underlying cause.
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    copy_file_with_metadata(source, destination)
        .map_err(|e| copy_failure_error(e, source.to_path_buf(), destination.to_path_buf()))
}

/// Copies bytes, then permissions and timestamps, from `source` to `destination`
///
/// A copy whose metadata cannot be applied is removed again, so a failed
/// file never occupies a destination name.
pub fn copy_file_with_metadata(source: &Path, destination: &Path) -> io::Result<()> {
    let options = CopyOptions::new().overwrite(false).skip_exist(false);

    trace!(
        "Copying file: {} -> {}",
        source.display(),
        destination.display()
    );
    copy(source, destination, &options).map_err(into_io_error)?;

    discard_on_error(destination, apply_metadata(source, destination))
}

fn discard_on_error(destination: &Path, result: io::Result<()>) -> io::Result<()> {
    if result.is_err() {
        if let Err(e) = fs::remove_file(destination) {
            warn!(
                "Failed to remove incomplete copy {}: {e}",
                destination.display()
            );
        }
    }
    result
}

fn apply_metadata(source: &Path, destination: &Path) -> io::Result<()> {
    let stat_source = fs::metadata(source)?;
    fs::set_permissions(destination, stat_source.permissions())?;

    let access_time = FileTime::from_last_access_time(&stat_source);
    let modification_time = FileTime::from_last_modification_time(&stat_source);
    set_file_times(destination, access_time, modification_time)
}

fn into_io_error(err: fs_extra::error::Error) -> io::Error {
    use fs_extra::error::ErrorKind;

    let kind = match &err.kind {
        ErrorKind::NotFound => io::ErrorKind::NotFound,
        ErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
        ErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
        ErrorKind::Interrupted => io::ErrorKind::Interrupted,
        ErrorKind::Io(io_error) => io_error.kind(),
        _ => io::ErrorKind::Other,
    };
    io::Error::new(kind, err)
}
