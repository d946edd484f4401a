/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Character placed between the segments of a flattened relative path
pub const JOIN_CHAR: &str = "_";

/// Extensions collected when nothing overrides them
pub const DEFAULT_TARGET_EXTENSIONS: [&str; 4] = [".xlsx", ".xls", ".pptx", ".ppt"];

/// Qualifier string used for application identification
///
/// This is used as part of the application's unique identifier.
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
pub const ORGANIZATION: &str = "Ondřej Vágner";

/// Application name used for identification
///
/// This is the name of the application used in various contexts like
/// configuration file paths and application identification.
pub const APPLICATION: &str = "file_flatten";

/// Name of the settings file looked up in the working and configuration directories
pub const DEFAULT_CONFIG_FILE: &str = "fflat.yaml";

/// Environment variable holding the source directory
pub const ENV_SOURCE_DIR: &str = "SOURCE_DIR";

/// Environment variable holding the destination directory
pub const ENV_DEST_DIR: &str = "DEST_DIR";

/// Environment variable holding a comma-separated extension list
pub const ENV_TARGET_EXTENSIONS: &str = "TARGET_EXTENSIONS";

/// Environment variable holding the log file path
pub const ENV_LOG_FILE: &str = "LOG_FILE";

/// Help text for the source command-line option
pub const SOURCE_HELP: &str = "Directory to collect files from";

/// Help text for the destination command-line option
pub const DESTINATION_HELP: &str = "Directory the flattened copies are written to";

/// Help text for the extensions command-line option
pub const EXTENSIONS_HELP: &str =
    "Comma-separated list of extensions to collect (replaces the default set)";

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read settings from a specific YAML file";

/// Help text for the dry-run command-line option
pub const DRY_RUN_HELP: &str = "Show where files would be copied without copying anything";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the quiet command-line option
pub const QUIET_HELP: &str = "Only report warnings and errors";

/// Help text for the log file command-line option
pub const LOG_FILE_HELP: &str = "Also write log messages to this file";

/// Help text for the progress command-line option
pub const NO_PROGRESS_HELP: &str = "Do not draw a progress bar";

/// Help text for the wait command-line option
pub const WAIT_HELP: &str = "Wait for Enter before exiting when run from a terminal";
