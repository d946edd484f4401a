//! Configuration module
//!
//! This module contains components for loading settings and turning them
//! into run options.

pub mod deserializer;
mod loader;
mod model;

pub use deserializer::expand_path;
pub use loader::{
    load_settings, locate_settings_file, resolve_settings, settings_from_env,
    settings_from_lookup,
};
pub use model::Settings;
