// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings as read from the TOML file.
///
/// ```toml
/// monitor_dir = "C:/Noggit/project/world/maps/MyMap"
/// french_converter_path = "C:/Tools/SLFiledataADTConverter/SLFiledataADTConverter.exe"
/// mtxp_converter_path = "C:/Tools/MTXP/7x_TexAdt_MTXP_Adder.exe"
/// output_dir = "C:/Epsilon/_retail_/Patches/MyPatch/world/maps/MyMap"
/// replace_map_name_in = "MyMap"
/// replace_map_name_out = "RetailMap"
/// epsilon_dir = "C:/Epsilon"
/// ```
///
/// The PascalCase keys from older `settings.json` files are accepted as
/// aliases. Nothing here is validated; see [`Settings`] for the checked form.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSettings {
    #[serde(default, alias = "MonitorDir")]
    pub monitor_dir: Option<String>,

    #[serde(default, alias = "FrenchConverterPath")]
    pub french_converter_path: Option<String>,

    #[serde(default, alias = "MTXPConverterPath")]
    pub mtxp_converter_path: Option<String>,

    #[serde(default, alias = "OutputDir")]
    pub output_dir: Option<String>,

    #[serde(default, alias = "ReplaceMapNameIn")]
    pub replace_map_name_in: String,

    #[serde(default, alias = "ReplaceMapNameOut")]
    pub replace_map_name_out: String,

    /// Empty disables the Epsilon listfile mirror.
    #[serde(default, alias = "EpsilonDir")]
    pub epsilon_dir: String,

    /// Output substring after which SLFiledataADTConverter is killed.
    #[serde(default = "default_french_exit_marker")]
    pub french_exit_marker: String,

    /// Output substring after which the MTXP adder is killed.
    #[serde(default = "default_mtxp_exit_marker")]
    pub mtxp_exit_marker: String,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            monitor_dir: None,
            french_converter_path: None,
            mtxp_converter_path: None,
            output_dir: None,
            replace_map_name_in: String::new(),
            replace_map_name_out: String::new(),
            epsilon_dir: String::new(),
            french_exit_marker: default_french_exit_marker(),
            mtxp_exit_marker: default_mtxp_exit_marker(),
        }
    }
}

pub fn default_french_exit_marker() -> String {
    "Press any key to exit the program".to_string()
}

pub fn default_mtxp_exit_marker() -> String {
    "All done!".to_string()
}

/// Literal file name substitution applied while staging Converter-A inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
}

impl RenameRule {
    /// Build a rule, or `None` when either side is empty.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Option<Self> {
        let from = from.into();
        let to = to.into();
        if from.is_empty() || to.is_empty() {
            None
        } else {
            Some(Self { from, to })
        }
    }

    /// Replace the first occurrence of `from` in `name`.
    pub fn apply(&self, name: &str) -> String {
        name.replacen(&self.from, &self.to, 1)
    }
}

/// Validated, immutable settings shared by every component.
///
/// Construct via `Settings::try_from(RawSettings)`; the constructor below is
/// only reachable after validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub monitor_dir: PathBuf,
    pub french_converter_path: PathBuf,
    pub mtxp_converter_path: PathBuf,
    pub output_dir: PathBuf,
    pub rename: Option<RenameRule>,
    pub epsilon_dir: Option<PathBuf>,
    pub french_exit_marker: String,
    pub mtxp_exit_marker: String,
}

impl Settings {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_unchecked(
        monitor_dir: PathBuf,
        french_converter_path: PathBuf,
        mtxp_converter_path: PathBuf,
        output_dir: PathBuf,
        rename: Option<RenameRule>,
        epsilon_dir: Option<PathBuf>,
        french_exit_marker: String,
        mtxp_exit_marker: String,
    ) -> Self {
        Self {
            monitor_dir,
            french_converter_path,
            mtxp_converter_path,
            output_dir,
            rename,
            epsilon_dir,
            french_exit_marker,
            mtxp_exit_marker,
        }
    }

    /// Directory containing SLFiledataADTConverter (its working directory).
    pub fn french_base_dir(&self) -> PathBuf {
        base_dir_of(&self.french_converter_path)
    }

    /// Directory containing the MTXP adder (its working directory).
    pub fn mtxp_base_dir(&self) -> PathBuf {
        base_dir_of(&self.mtxp_converter_path)
    }
}

fn base_dir_of(exe: &Path) -> PathBuf {
    match exe.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_rule_requires_both_sides() {
        assert!(RenameRule::new("", "").is_none());
        assert!(RenameRule::new("Old", "").is_none());
        assert!(RenameRule::new("", "New").is_none());
        assert!(RenameRule::new("Old", "New").is_some());
    }

    #[test]
    fn rename_rule_replaces_first_occurrence() {
        let rule = RenameRule::new("Old", "New").unwrap();
        assert_eq!(rule.apply("OldMap_tex0.adt"), "NewMap_tex0.adt");
        assert_eq!(rule.apply("Old_Old_1_1.adt"), "New_Old_1_1.adt");
        assert_eq!(rule.apply("Other_1_1.adt"), "Other_1_1.adt");
    }

    #[test]
    fn bare_executable_name_runs_from_current_dir() {
        assert_eq!(base_dir_of(Path::new("tool.exe")), PathBuf::from("."));
        assert_eq!(
            base_dir_of(Path::new("/opt/tools/tool.exe")),
            PathBuf::from("/opt/tools")
        );
    }
}
