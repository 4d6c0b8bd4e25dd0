#![allow(dead_code)]

use std::path::{Path, PathBuf};

use autoupconvert::config::{RawSettings, Settings};
use autoupconvert::fs::mock::MockFileSystem;

/// Builder for `Settings` to simplify test setup.
///
/// Defaults to a layout rooted at `/work`:
///
/// ```text
/// /work/noggit/maps/Azeroth          monitor dir
/// /work/french/SLFiledataADTConverter.exe
/// /work/mtxp/7x_TexAdt_MTXP_Adder.exe
/// /work/output                       output dir
/// ```
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::rooted_at("/work")
    }

    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let s = |p: PathBuf| Some(p.to_string_lossy().into_owned());
        Self {
            raw: RawSettings {
                monitor_dir: s(root.join("noggit").join("maps").join("Azeroth")),
                french_converter_path: s(root.join("french").join("SLFiledataADTConverter.exe")),
                mtxp_converter_path: s(root.join("mtxp").join("7x_TexAdt_MTXP_Adder.exe")),
                output_dir: s(root.join("output")),
                ..RawSettings::default()
            },
        }
    }

    pub fn rename(mut self, from: &str, to: &str) -> Self {
        self.raw.replace_map_name_in = from.to_string();
        self.raw.replace_map_name_out = to.to_string();
        self
    }

    pub fn epsilon_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.raw.epsilon_dir = dir.as_ref().to_string_lossy().into_owned();
        self
    }

    pub fn french_exit_marker(mut self, marker: &str) -> Self {
        self.raw.french_exit_marker = marker.to_string();
        self
    }

    pub fn mtxp_exit_marker(mut self, marker: &str) -> Self {
        self.raw.mtxp_exit_marker = marker.to_string();
        self
    }

    pub fn raw(self) -> RawSettings {
        self.raw
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create every directory and executable `settings` refers to on `fs`,
/// including both converters' stage folders.
pub fn populate_layout(fs: &MockFileSystem, settings: &Settings) {
    fs.add_dir(&settings.monitor_dir);
    fs.add_dir(&settings.output_dir);
    fs.add_file(&settings.french_converter_path, b"exe".to_vec());
    fs.add_file(&settings.mtxp_converter_path, b"exe".to_vec());

    let french = settings.french_base_dir();
    fs.add_dir(french.join("INPUT"));
    fs.add_dir(french.join("OUTPUT"));

    let mtxp = settings.mtxp_base_dir();
    fs.add_dir(mtxp.join("Input"));
    fs.add_dir(mtxp.join("Output"));

    if let Some(epsilon) = &settings.epsilon_dir {
        fs.add_dir(epsilon);
    }
}
