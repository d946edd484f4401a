//! Logger setup
//!
//! Console records go to stdout and are coloured by level only when stdout
//! is a terminal and `NO_COLOR` is unset. A log file, when configured,
//! receives the same records with a timestamp and level prefix.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Verbosity level for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    /// Warnings, failed copies and the summary problems only
    Warning,
    /// Per-file progress and the summary (default)
    Info,
    /// Adds collision notes and skipped files as they are found
    Debug,
    /// Adds every scanned entry and copy call
    Trace,
}

impl LogLevel {
    /// Level selected by the `-v` count and the `-q` flag
    ///
    /// `quiet` wins over any number of `-v`.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return LogLevel::Warning;
        }
        match verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Installs the global logger
///
/// When `log_file` is given its parent directory is created and records are
/// appended to it.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a logger is already
/// installed.
pub fn init_logger(verbosity: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let mut dispatch = Dispatch::new()
        .level(verbosity.to_level_filter())
        .chain(console_dispatch(use_color()));

    if let Some(path) = log_file {
        dispatch = dispatch.chain(file_dispatch(path)?);
    }

    dispatch
        .apply()
        .context("A global logger is already installed")?;

    log::debug!("Logging at {verbosity} level");
    if let Some(path) = log_file {
        log::debug!("Also logging to {}", path.display());
    }

    Ok(())
}

fn console_dispatch(color: bool) -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .debug(Color::White)
        .trace(Color::BrightBlack);

    Dispatch::new()
        .format(move |out, message, record| {
            if color {
                out.finish(format_args!(
                    "\x1B[{}m{}\x1B[0m",
                    colors.get_color(&record.level()).to_fg_str(),
                    message
                ))
            } else {
                out.finish(format_args!("{message}"))
            }
        })
        .chain(std::io::stdout())
}

fn file_dispatch(path: &Path) -> Result<Dispatch> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = fern::log_file(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok(Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .chain(file))
}

/// Whether standard output is an interactive terminal
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn use_color() -> bool {
    is_interactive() && std::env::var_os("NO_COLOR").is_none()
}

/// Picks the coloured variant of a message when colour output is enabled
pub fn format_message(message: &str, colored_message: &str) -> String {
    if use_color() {
        colored_message.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Record};
    use tempfile::tempdir;

    #[test]
    fn test_from_flags() {
        assert_eq!(LogLevel::from_flags(0, false), LogLevel::Info);
        assert_eq!(LogLevel::from_flags(1, false), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(2, false), LogLevel::Trace);
        assert_eq!(LogLevel::from_flags(255, false), LogLevel::Trace);
        assert_eq!(LogLevel::from_flags(2, true), LogLevel::Warning);
    }

    #[test]
    fn test_to_level_filter() {
        assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warning.to_level_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_display() {
        assert_eq!(LogLevel::Warning.to_string(), "warning");
        assert_eq!(LogLevel::Info.to_string(), "info");
    }

    #[test]
    fn test_file_dispatch_creates_directory_and_writes() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("logs").join("run.log");

        let (_, logger) = file_dispatch(&path).unwrap().into_log();
        logger.log(
            &Record::builder()
                .args(format_args!("copied report.xlsx"))
                .level(Level::Info)
                .target("file_flatten")
                .build(),
        );
        logger.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("INFO  copied report.xlsx"));
    }

    #[test]
    fn test_format_message() {
        // Depends on whether the test runner owns a terminal, so accept both
        let plain_message = "Copied 3 files";
        let colored_message = "\x1B[32mCopied 3 files\x1B[0m";

        let result = format_message(plain_message, colored_message);
        assert!(result == plain_message || result == colored_message);
    }
}
