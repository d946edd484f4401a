//! File discovery module
//!
//! This module contains components for scanning the source tree and deciding
//! which files are collected.

mod extensions;
mod scanner;

pub use extensions::{TargetExtensions, lowercase_extension};
pub use scanner::{
    CheckedRoots, FileEntry, ScanResult, ScannedEntry, check_roots, scan_directory, scan_entries,
};
