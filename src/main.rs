use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{LevelFilter, debug, error, info};

use file_flatten::cli::{
    check_for_stdout_stream, get_config_path, get_matches, get_verbosity, is_dry_run,
    settings_from_matches, should_wait, show_progress,
};
use file_flatten::config::{locate_settings_file, resolve_settings, settings_from_env};
use file_flatten::prelude::*;

/// Exit code when the run finished but some files could not be copied
const EXIT_PARTIAL_FAILURE: u8 = 2;

fn main() -> ExitCode {
    human_panic::setup_panic!();

    // A missing .env file is the normal case
    let _ = dotenv::dotenv();

    let matches = get_matches();
    let code = match run(&matches) {
        Ok(summary) if summary.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_PARTIAL_FAILURE),
        Err(e) => {
            report_fatal(&e);
            ExitCode::FAILURE
        }
    };

    check_for_stdout_stream(should_wait(&matches));
    code
}

fn run(matches: &ArgMatches) -> Result<RunSummary> {
    let working_dir = std::env::current_dir().context("Failed to read the working directory")?;
    let config_file = locate_settings_file(get_config_path(matches).as_deref(), &working_dir)?;
    let settings = resolve_settings(
        settings_from_matches(matches),
        settings_from_env(),
        config_file.as_deref(),
    )?;

    init_logger(get_verbosity(matches), settings.log_file.as_deref())?;
    if let Some(file) = &config_file {
        debug!("Using settings file {}", file.display());
    }

    let options = settings.into_options(is_dry_run(matches))?;
    info!(
        "Collecting [{}] from {} into {}{}",
        options.extensions,
        options.source.display(),
        options.destination.display(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    let mut reporter = ConsoleReporter::new(show_progress(matches));
    let summary = flatten_directory(&options, &mut reporter)?;
    Ok(summary)
}

fn report_fatal(e: &anyhow::Error) {
    if log::max_level() == LevelFilter::Off {
        eprintln!("Error: {e:#}");
    } else {
        error!("{e:#}");
    }
}
