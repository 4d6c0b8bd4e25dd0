// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{RawSettings, RenameRule, Settings};
use crate::errors::{Result, UpconvertError};
use crate::fs::FileSystem;

impl TryFrom<RawSettings> for Settings {
    type Error = crate::errors::UpconvertError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        let monitor_dir = required(raw.monitor_dir, "monitor_dir")?;
        let french_converter_path =
            required(raw.french_converter_path, "french_converter_path")?;
        let mtxp_converter_path = required(raw.mtxp_converter_path, "mtxp_converter_path")?;
        let output_dir = required(raw.output_dir, "output_dir")?;

        let rename = RenameRule::new(raw.replace_map_name_in, raw.replace_map_name_out);

        let epsilon_dir = if raw.epsilon_dir.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(raw.epsilon_dir))
        };

        Ok(Settings::new_unchecked(
            monitor_dir,
            french_converter_path,
            mtxp_converter_path,
            output_dir,
            rename,
            epsilon_dir,
            raw.french_exit_marker,
            raw.mtxp_exit_marker,
        ))
    }
}

fn required(value: Option<String>, key: &str) -> Result<PathBuf> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(PathBuf::from(v)),
        _ => Err(UpconvertError::ConfigError(format!(
            "missing required setting `{key}`"
        ))),
    }
}

/// Check that the paths named by `settings` exist on `fs`.
///
/// Checked in startup order:
/// - the monitored directory
/// - SLFiledataADTConverter's executable
/// - the MTXP adder's executable
/// - the Epsilon directory, if one is configured
///
/// `output_dir` is not checked here; a missing output directory surfaces as
/// a failed run instead.
pub fn validate_paths(settings: &Settings, fs: &dyn FileSystem) -> Result<()> {
    if !fs.is_dir(&settings.monitor_dir) {
        return Err(UpconvertError::ConfigError(format!(
            "Input directory to monitor not found ({})",
            settings.monitor_dir.display()
        )));
    }

    if !fs.is_file(&settings.french_converter_path) {
        return Err(UpconvertError::ConfigError(format!(
            "SLFiledataADTConverter not found ({})",
            settings.french_converter_path.display()
        )));
    }

    if !fs.is_file(&settings.mtxp_converter_path) {
        return Err(UpconvertError::ConfigError(format!(
            "7x_TexAdt_MTXP_Adder not found ({})",
            settings.mtxp_converter_path.display()
        )));
    }

    if let Some(epsilon) = &settings.epsilon_dir {
        if !fs.is_dir(epsilon) {
            return Err(UpconvertError::ConfigError(format!(
                "Epsilon directory not found ({})",
                epsilon.display()
            )));
        }
    }

    Ok(())
}
