//! Configuration loading functionality
//!
//! This module finds the settings file, reads the environment layer and
//! stacks them with the command-line layer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::{debug, info};
use serde_yaml::from_str;

use crate::config::deserializer::process_path;
use crate::constants::{
    DEFAULT_CONFIG_FILE, ENV_DEST_DIR, ENV_LOG_FILE, ENV_SOURCE_DIR, ENV_TARGET_EXTENSIONS,
};
use crate::utils::project_config_dir;

use super::model::Settings;

/// Loads a settings file
///
/// # Arguments
/// * `file` - Path to the YAML settings file
///
/// # Returns
/// * `Result<Settings>` - The settings layer from the file or an error
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid YAML for [`Settings`]
pub fn load_settings(file: &Path) -> Result<Settings> {
    let file_content = fs::read(file).map_err(|e| {
        anyhow!(
            "Failed to read settings file {}: {}",
            file.display(),
            e
        )
    })?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        anyhow!(
            "Settings file {} contains invalid UTF-8 characters: {}",
            file.display(),
            e
        )
    })?;

    if content_str.trim().is_empty() {
        debug!("Settings file {} is empty", file.display());
        return Ok(Settings::default());
    }

    let settings: Settings = from_str(&content_str).map_err(|e| {
        anyhow!(
            "Failed to parse settings file {}: {}\nPlease check the YAML syntax.",
            file.display(),
            e
        )
    })?;

    info!("Loaded settings from {}", file.display());
    Ok(settings)
}

/// Decides which settings file to read, if any
///
/// An explicit path must exist. Without one, `fflat.yaml` is looked up in
/// `working_dir` and then in the platform configuration directory; finding
/// neither is fine.
///
/// # Errors
/// Returns an error if an explicitly requested file does not exist
pub fn locate_settings_file(
    explicit: Option<&Path>,
    working_dir: &Path,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(anyhow!(
                "Settings file does not exist: {}\nPlease check the path passed to --config.",
                path.display()
            ));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = working_dir.join(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    let global = project_config_dir()
        .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
        .filter(|path| path.is_file());
    if global.is_none() {
        debug!("No settings file found, using defaults");
    }
    Ok(global)
}

/// Builds the environment layer from the process environment
pub fn settings_from_env() -> Settings {
    settings_from_lookup(|key| std::env::var(key).ok())
}

/// Builds the environment layer from any key lookup
///
/// Unset and blank variables are ignored. `TARGET_EXTENSIONS` is split on
/// commas.
pub fn settings_from_lookup<F>(lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let read_path = |key: &str| read(key).map(|value| PathBuf::from(process_path(value.trim())));

    Settings {
        source: read_path(ENV_SOURCE_DIR),
        destination: read_path(ENV_DEST_DIR),
        extensions: read(ENV_TARGET_EXTENSIONS)
            .map(|list| list.split(',').map(str::to_string).collect()),
        log_file: read_path(ENV_LOG_FILE),
    }
}

/// Stacks the command line over the environment over the settings file
///
/// # Errors
/// Returns an error if the settings file is requested but missing or invalid
pub fn resolve_settings(
    cli: Settings,
    env: Settings,
    config_file: Option<&Path>,
) -> Result<Settings> {
    let file = match config_file {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    Ok(cli.merge(env).merge(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_settings_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SOURCE_DIR", "/data/in"),
            ("DEST_DIR", "  "),
            ("TARGET_EXTENSIONS", ".custom,.csv"),
        ]);

        let settings = settings_from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.source, Some(PathBuf::from("/data/in")));
        assert_eq!(settings.destination, None, "Blank values are ignored");
        assert_eq!(
            settings.extensions,
            Some(vec![".custom".to_string(), ".csv".to_string()])
        );
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn test_locate_explicit_file_must_exist() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing.yaml");

        let result = locate_settings_file(Some(&missing), temp_dir.path());

        assert!(result.is_err());
    }

    #[test]
    fn test_locate_local_file() {
        let temp_dir = tempdir().unwrap();
        let local = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&local, "source: /in\n").unwrap();

        let found = locate_settings_file(None, temp_dir.path()).unwrap();

        assert_eq!(found, Some(local));
    }

    #[test]
    fn test_empty_settings_file() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("empty.yaml");
        fs::write(&file, "\n").unwrap();

        assert_eq!(load_settings(&file).unwrap(), Settings::default());
    }
}
