//! Directory scanning functionality
//!
//! This module walks the source tree and sorts every regular file into
//! targets and skipped files.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::discovery::extensions::{TargetExtensions, lowercase_extension};
use crate::errors::{
    Result, file_operation_error, source_equals_destination_error, source_not_directory_error,
    source_not_found_error,
};
use crate::utils::resolve_path;

/// A regular file found below the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Path relative to the source root
    pub relative: PathBuf,
    /// Lowercase extension including the leading dot
    pub extension: Option<String>,
}

impl FileEntry {
    /// Creates an entry for `path`, which must lie below `root`
    ///
    /// Returns `None` when `path` is not inside `root` or is the root itself.
    pub fn new(root: &Path, path: PathBuf) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?.to_path_buf();
        if relative.as_os_str().is_empty() {
            return None;
        }
        let extension = lowercase_extension(&path);
        Some(FileEntry {
            path,
            relative,
            extension,
        })
    }

    /// The relative path split into its segments, leaf last
    pub fn segments(&self) -> Vec<OsString> {
        self.relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment.to_os_string()),
                _ => None,
            })
            .collect()
    }
}

/// Classification of one scanned file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannedEntry {
    /// The extension is in the target set
    Target(FileEntry),
    /// Any other regular file
    Skipped(FileEntry),
}

impl ScannedEntry {
    /// Sorts a file by its recorded extension
    pub fn classify(file: FileEntry, extensions: &TargetExtensions) -> Self {
        let selected = file
            .extension
            .as_deref()
            .is_some_and(|extension| extensions.contains(extension));
        if selected {
            trace!("Target: {}", file.relative.display());
            ScannedEntry::Target(file)
        } else {
            trace!("Skipped: {}", file.relative.display());
            ScannedEntry::Skipped(file)
        }
    }
}

/// Outcome of a full scan
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub targets: Vec<FileEntry>,
    pub skipped: Vec<FileEntry>,
}

/// Source and destination roots that passed the precondition checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedRoots {
    /// Canonical source directory
    pub source: PathBuf,
    /// Absolute destination directory with existing ancestors canonicalised
    pub destination: PathBuf,
}

impl CheckedRoots {
    /// The destination when it lies strictly inside the source tree
    pub fn nested_destination(&self) -> Option<&Path> {
        (self.destination != self.source && self.destination.starts_with(&self.source))
            .then_some(self.destination.as_path())
    }
}

/// Verifies the source exists, is a directory and differs from the destination
///
/// Nothing on disk is touched.
///
/// # Errors
/// * `SourceNotFound` when the source does not exist
/// * `SourceNotDirectory` when the source is not a directory
/// * `SourceEqualsDestination` when both resolve to the same location
pub fn check_roots(source: &Path, destination: &Path) -> Result<CheckedRoots> {
    if !source.exists() {
        return Err(source_not_found_error(source.to_path_buf()));
    }
    if !source.is_dir() {
        return Err(source_not_directory_error(source.to_path_buf()));
    }

    let canonical_source = fs::canonicalize(source)
        .map_err(|e| file_operation_error(e, source.to_path_buf(), "resolve"))?;
    let resolved_destination = resolve_path(destination)
        .map_err(|e| file_operation_error(e, destination.to_path_buf(), "resolve"))?;

    if canonical_source == resolved_destination {
        return Err(source_equals_destination_error(canonical_source));
    }

    Ok(CheckedRoots {
        source: canonical_source,
        destination: resolved_destination,
    })
}

/// Lazily walks `root` and classifies every regular file
///
/// Entries are visited in file-name order so repeated runs over an unchanged
/// tree yield the same sequence. Directory symlinks are not followed; a
/// symlink that resolves to a regular file is treated as one. When `exclude`
/// is given, that subtree is not entered.
pub fn scan_entries<'a>(
    root: &'a Path,
    extensions: &'a TargetExtensions,
    exclude: Option<&'a Path>,
) -> impl Iterator<Item = ScannedEntry> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| exclude.is_none_or(|excluded| entry.path() != excluded))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(is_regular_file)
        .filter_map(move |entry| {
            let file = FileEntry::new(root, entry.into_path())?;
            Some(ScannedEntry::classify(file, extensions))
        })
}

/// Scans the whole tree below `root` and collects the classified files
pub fn scan_directory(
    root: &Path,
    extensions: &TargetExtensions,
    exclude: Option<&Path>,
) -> ScanResult {
    debug!("Scanning directory: {}", root.display());

    let mut result = ScanResult::default();
    for entry in scan_entries(root, extensions, exclude) {
        match entry {
            ScannedEntry::Target(file) => result.targets.push(file),
            ScannedEntry::Skipped(file) => result.skipped.push(file),
        }
    }

    debug!(
        "Found {} target and {} skipped files",
        result.targets.len(),
        result.skipped.len()
    );

    result
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file());
    }
    false
}
