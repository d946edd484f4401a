use std::path::PathBuf;

use clap::{
    Arg, ArgAction, ArgMatches, Command, command, crate_authors, crate_description, crate_name,
    crate_version,
};

use crate::config::Settings;
use crate::constants::{
    CONFIG_HELP, DESTINATION_HELP, DRY_RUN_HELP, EXTENSIONS_HELP, LOG_FILE_HELP,
    NO_PROGRESS_HELP, QUIET_HELP, SOURCE_HELP, VERBOSE_HELP, WAIT_HELP,
};
use crate::logging::{LogLevel, is_interactive};

/// Waits for Enter when `wait` is set and stdout is a terminal
///
/// Keeps the console window open when the program was started from a file
/// manager.
pub fn check_for_stdout_stream(wait: bool) {
    if wait && is_interactive() {
        dont_disappear::enter_to_continue::default();
    }
}

/// Defines the command-line interface
///
/// Defines the following arguments:
/// - `source` / `destination`: Directories to read from and write to
/// - `extensions`: Comma-separated extension list replacing the default set
/// - `config`: Path to a YAML settings file
/// - `dry`: Name files without copying anything
/// - `verbose`: Increase verbosity level
/// - `quiet`: Only report warnings and errors
/// - `log_file`: Also log to this file
/// - `no_progress`: Never draw a progress bar
/// - `wait`: Wait for Enter before exiting
pub fn build_command() -> Command {
    let arg_source = Arg::new("source")
        .short('s')
        .long("source")
        .value_name("DIR")
        .help(SOURCE_HELP);

    let arg_destination = Arg::new("destination")
        .short('d')
        .long("destination")
        .value_name("DIR")
        .help(DESTINATION_HELP);

    let arg_extensions = Arg::new("extensions")
        .short('e')
        .long("extensions")
        .value_name("LIST")
        .help(EXTENSIONS_HELP);

    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help(CONFIG_HELP);

    let arg_dry = Arg::new("dry")
        .short('n')
        .long("dry")
        .help(DRY_RUN_HELP)
        .action(ArgAction::SetTrue);

    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count);

    let arg_quiet = Arg::new("quiet")
        .short('q')
        .long("quiet")
        .help(QUIET_HELP)
        .action(ArgAction::SetTrue)
        .conflicts_with("verbose");

    let arg_log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .value_name("FILE")
        .help(LOG_FILE_HELP);

    let arg_no_progress = Arg::new("no_progress")
        .long("no-progress")
        .help(NO_PROGRESS_HELP)
        .action(ArgAction::SetTrue);

    let arg_wait = Arg::new("wait")
        .short('w')
        .long("wait")
        .help(WAIT_HELP)
        .action(ArgAction::SetTrue);

    command!()
        .author(crate_authors!())
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .arg(arg_source)
        .arg(arg_destination)
        .arg(arg_extensions)
        .arg(arg_config)
        .arg(arg_dry)
        .arg(arg_verbose)
        .arg(arg_quiet)
        .arg(arg_log_file)
        .arg(arg_no_progress)
        .arg(arg_wait)
}

/// Parses the process arguments, exiting with usage on error
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Builds the command-line settings layer
///
/// Paths are taken as given; the shell has already expanded them.
pub fn settings_from_matches(matches: &ArgMatches) -> Settings {
    let path = |id: &str| matches.get_one::<String>(id).map(PathBuf::from);

    Settings {
        source: path("source"),
        destination: path("destination"),
        extensions: matches
            .get_one::<String>("extensions")
            .map(|list| list.split(',').map(str::to_string).collect()),
        log_file: path("log_file"),
    }
}

/// Gets the verbosity level from the -v/--verbose count and -q/--quiet
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    LogLevel::from_flags(matches.get_count("verbose"), matches.get_flag("quiet"))
}

pub fn get_config_path(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<String>("config").map(PathBuf::from)
}

pub fn is_dry_run(matches: &ArgMatches) -> bool {
    matches.get_flag("dry")
}

/// Whether a progress bar may be drawn
pub fn show_progress(matches: &ArgMatches) -> bool {
    !matches.get_flag("no_progress") && is_interactive()
}

pub fn should_wait(matches: &ArgMatches) -> bool {
    matches.get_flag("wait")
}
