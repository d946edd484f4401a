//! File operations module
//!
//! This module contains the copy primitive used to fill the destination.

mod copier;

pub use copier::{copy_file, copy_file_with_metadata, ensure_destination};
