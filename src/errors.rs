use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while flattening a tree
#[derive(Debug)]
pub enum Error {
    /// The source directory does not exist
    SourceNotFound { path: PathBuf },
    /// The source path exists but is not a directory
    SourceNotDirectory { path: PathBuf },
    /// Source and destination resolve to the same location
    SourceEqualsDestination { path: PathBuf },
    /// A single file could not be copied into the destination
    CopyFailure {
        source: io::Error,
        path: PathBuf,
        destination: PathBuf,
    },
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Settings could not be turned into a usable run configuration
    InvalidConfiguration { detail: String },
    /// Generic error with a message
    Generic { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SourceNotFound { path } => {
                write!(f, "Source directory not found: {}", path.display())
            }
            Error::SourceNotDirectory { path } => {
                write!(f, "Source path is not a directory: {}", path.display())
            }
            Error::SourceEqualsDestination { path } => {
                write!(
                    f,
                    "Source and destination are the same directory: {}",
                    path.display()
                )
            }
            Error::CopyFailure {
                source,
                path,
                destination,
            } => {
                write!(
                    f,
                    "Failed to copy {} to {}: {source}",
                    path.display(),
                    destination.display()
                )
            }
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} {}", operation, path.display())
            }
            Error::InvalidConfiguration { detail } => {
                write!(f, "Invalid configuration: {detail}")
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::CopyFailure { source, .. } => Some(source),
            Error::FileOperation { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::FileOperation {
            source: err,
            path: PathBuf::new(),
            operation: "access".to_string(),
        }
    }
}

/// Result alias used throughout the library
///
/// # Examples
/// ```
/// use std::path::Path;
/// use file_flatten::prelude::{Result, source_not_found_error};
///
/// fn require_source(path: &Path) -> Result<()> {
///     if path.exists() {
///         Ok(())
///     } else {
///         Err(source_not_found_error(path.to_path_buf()))
///     }
/// }
///
/// assert!(require_source(Path::new("/definitely/not/here")).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a source-not-found error
pub fn source_not_found_error(path: PathBuf) -> Error {
    Error::SourceNotFound { path }
}

/// Helper function to create a source-not-a-directory error
pub fn source_not_directory_error(path: PathBuf) -> Error {
    Error::SourceNotDirectory { path }
}

/// Helper function to create a source-equals-destination error
pub fn source_equals_destination_error(path: PathBuf) -> Error {
    Error::SourceEqualsDestination { path }
}

/// Helper function to create a copy failure
pub fn copy_failure_error(err: io::Error, path: PathBuf, destination: PathBuf) -> Error {
    Error::CopyFailure {
        source: err,
        path,
        destination,
    }
}

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create an invalid configuration error
pub fn invalid_configuration_error(detail: &str) -> Error {
    Error::InvalidConfiguration {
        detail: detail.to_string(),
    }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}
