//! Configuration data structures

use std::path::PathBuf;

use serde::Deserialize;

use crate::config::deserializer::{deserialize_extension_list, deserialize_optional_path};
use crate::constants::{ENV_DEST_DIR, ENV_SOURCE_DIR, ENV_TARGET_EXTENSIONS};
use crate::discovery::TargetExtensions;
use crate::errors::{Result, invalid_configuration_error};
use crate::workflow::FlattenOptions;

/// One layer of settings: the settings file, the environment or the command line
///
/// Every field is optional so layers can be stacked; see [`Settings::merge`].
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory to collect files from
    #[serde(default, deserialize_with = "deserialize_optional_path")]
    pub source: Option<PathBuf>,
    /// Directory the flattened copies are written to
    #[serde(default, deserialize_with = "deserialize_optional_path")]
    pub destination: Option<PathBuf>,
    /// Extensions to collect; replaces the default set entirely
    #[serde(default, deserialize_with = "deserialize_extension_list")]
    pub extensions: Option<Vec<String>>,
    /// Log file written next to the console output
    #[serde(default, deserialize_with = "deserialize_optional_path")]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Combines two layers, preferring values from `self`
    pub fn merge(self, lower: Settings) -> Settings {
        Settings {
            source: self.source.or(lower.source),
            destination: self.destination.or(lower.destination),
            extensions: self.extensions.or(lower.extensions),
            log_file: self.log_file.or(lower.log_file),
        }
    }

    /// The extension set these settings select
    ///
    /// # Errors
    /// Returns an error when an extension list is given but contains no usable entry.
    pub fn target_extensions(&self) -> Result<TargetExtensions> {
        match &self.extensions {
            None => Ok(TargetExtensions::default()),
            Some(list) => {
                let extensions = TargetExtensions::new(list);
                if extensions.is_empty() {
                    return Err(invalid_configuration_error(&format!(
                        "the extension list {list:?} does not name any extension \
                         (check --extensions, {ENV_TARGET_EXTENSIONS} or `extensions:`)"
                    )));
                }
                Ok(extensions)
            }
        }
    }

    /// Turns fully merged settings into run options
    ///
    /// # Errors
    /// Returns an error when the source or destination is missing or the
    /// extension list is empty.
    pub fn into_options(self, dry_run: bool) -> Result<FlattenOptions> {
        let extensions = self.target_extensions()?;

        let source = self.source.ok_or_else(|| {
            invalid_configuration_error(&format!(
                "no source directory given; use --source, {ENV_SOURCE_DIR} or `source:` in the settings file"
            ))
        })?;
        let destination = self.destination.ok_or_else(|| {
            invalid_configuration_error(&format!(
                "no destination directory given; use --destination, {ENV_DEST_DIR} or `destination:` in the settings file"
            ))
        })?;

        Ok(FlattenOptions::new(source, destination)
            .with_extensions(extensions)
            .dry_run(dry_run))
    }
}
