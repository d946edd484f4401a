//! Collects files of selected types from a directory tree into one flat
//! directory.
//!
//! Each copy is named after its path relative to the source root, with the
//! directory separators replaced by `_`, so `dir2/sub/file2.pptx` becomes
//! `dir2_sub_file2.pptx`. Names that are already taken, either earlier in
//! the same run or by a file already in the destination, get a `_1`, `_2`,
//! ... suffix in front of the extension. Nothing is ever overwritten.
//!
//! ```no_run
//! use file_flatten::prelude::*;
//!
//! # fn main() -> file_flatten::prelude::Result<()> {
//! let options = FlattenOptions::new("reports", "collected");
//! let summary = flatten_directory(&options, &mut LogReporter)?;
//! println!("{} copied, {} failed", summary.success_count(), summary.error_count());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod errors;
pub mod file_ops;
pub mod logging;
pub mod path_gen;
pub mod utils;
pub mod workflow;

pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::discovery::{FileEntry, TargetExtensions};
    pub use crate::errors::{
        Error, Result, copy_failure_error, file_operation_error, generic_error,
        invalid_configuration_error, source_equals_destination_error, source_not_found_error,
    };
    pub use crate::logging::{LogLevel, format_message, init_logger};
    pub use crate::path_gen::{FlatName, Namer};
    pub use crate::workflow::{
        ConsoleReporter, FlattenEvent, FlattenOptions, LogReporter, NoopReporter, Reporter,
        RunSummary, flatten_directory,
    };
}
