// src/watch/patterns.rs

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};

/// Map tiles written by Noggit.
pub const ADT_PATTERN: &str = "*.adt";

/// Texture tiles consumed by the MTXP adder.
pub const TEX0_PATTERN: &str = "*_tex0.adt";

/// Every file.
pub const ANY_FILE_PATTERN: &str = "*";

/// Compiled glob matched against a bare file name.
///
/// Matching is case-insensitive, like directory listings on the Windows
/// hosts these converters run on. Only the final path component is matched.
#[derive(Clone)]
pub struct FilePattern {
    raw: String,
    matcher: GlobMatcher,
}

impl fmt::Debug for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilePattern").field(&self.raw).finish()
    }
}

impl FilePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .with_context(|| format!("building file pattern {pattern:?}"))?;

        Ok(Self {
            raw: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn adt() -> Result<Self> {
        Self::new(ADT_PATTERN)
    }

    pub fn tex0() -> Result<Self> {
        Self::new(TEX0_PATTERN)
    }

    pub fn any() -> Result<Self> {
        Self::new(ANY_FILE_PATTERN)
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }

    /// Match the file name of `path`; paths without a UTF-8 file name never match.
    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.matches_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adt_pattern_matches_tiles_only() {
        let p = FilePattern::adt().unwrap();
        assert!(p.matches_name("Azeroth_32_48.adt"));
        assert!(p.matches_name("Azeroth_32_48_tex0.adt"));
        assert!(p.matches_name("AZEROTH_32_48.ADT"));
        assert!(!p.matches_name("Azeroth.wdt"));
        assert!(!p.matches_name("Azeroth_32_48.adt.bak"));
    }

    #[test]
    fn tex0_pattern() {
        let p = FilePattern::tex0().unwrap();
        assert!(p.matches_name("Azeroth_32_48_tex0.adt"));
        assert!(!p.matches_name("Azeroth_32_48_obj0.adt"));
        assert!(!p.matches_name("Azeroth_32_48.adt"));
    }

    #[test]
    fn matches_only_the_file_name() {
        let p = FilePattern::adt().unwrap();
        assert!(p.matches_path(Path::new("/maps/x.adt/Azeroth_1_1.adt")));
        assert!(!p.matches_path(Path::new("/maps/x.adt/readme.txt")));
        assert!(FilePattern::any().unwrap().matches_path(Path::new("/maps/Azeroth.wdt")));
    }
}
