// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{RawSettings, Settings};
use crate::errors::{Result, UpconvertError};

/// Load a settings file from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** check required
/// keys or paths. Use [`load_settings`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        UpconvertError::ConfigError(format!("reading settings file {}: {e}", path.display()))
    })?;

    let raw: RawSettings = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load settings from path and check that every required key is present.
///
/// Path existence is checked separately by
/// [`validate_paths`](crate::config::validate::validate_paths), after the
/// listfile has been loaded.
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(&path)?;
    Settings::try_from(raw)
}
