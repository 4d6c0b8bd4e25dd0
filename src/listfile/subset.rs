// src/listfile/subset.rs

//! Per-consumer listfile filters.

use std::fmt;

use super::table::{FileId, Listfile};

/// Extensions SLFiledataADTConverter resolves.
pub const FRENCH_EXTENSIONS: &[&str] = &[".blp", ".wmo", ".adt", ".wdt", ".wdl", ".m2"];

/// Noggit's error textures, appended to SLFiledataADTConverter's listfile.
pub const NOGGIT_ERROR_TEXTURES: &[(FileId, &str)] = &[
    (100, "error_0_s.blp"),
    (101, "error_1_s.blp"),
    (102, "error_2_s.blp"),
    (103, "error_3_s.blp"),
    (104, "error_4_s.blp"),
];

/// Prefix of the entries the MTXP adder needs.
pub const TILESET_PREFIX: &str = "tileset/";

/// Extensions left out of the Epsilon mirror.
pub const EPSILON_EXTENSION_BLACKLIST: &[&str] = &[".unk", ".pd4", ".pm4", ".meta", ".dat", ".col"];

/// A downstream consumer of a filtered listfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListfileSubset {
    /// Converter-A (SLFiledataADTConverter).
    FrenchConverter,
    /// Converter-B (7x_TexAdt_MTXP_Adder).
    MtxpConverter,
    /// Optional Epsilon installation.
    EpsilonMirror,
}

impl fmt::Display for ListfileSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListfileSubset::FrenchConverter => f.write_str("SLFiledataADTConverter"),
            ListfileSubset::MtxpConverter => f.write_str("7x_TexAdt_MTXP_Adder"),
            ListfileSubset::EpsilonMirror => f.write_str("Epsilon"),
        }
    }
}

impl ListfileSubset {
    /// Whether an entry with this virtual path belongs in the subset.
    pub fn keeps(&self, path: &str) -> bool {
        match self {
            ListfileSubset::FrenchConverter => FRENCH_EXTENSIONS.contains(&extension(path)),
            ListfileSubset::MtxpConverter => path.starts_with(TILESET_PREFIX),
            ListfileSubset::EpsilonMirror => {
                !EPSILON_EXTENSION_BLACKLIST.contains(&extension(path))
            }
        }
    }

    /// Filter `listfile` and append any fixed entries for this consumer.
    ///
    /// Fixed entries are appended after filtering even if their ids already
    /// appear, so they always land at the end of the rendered file.
    pub fn render(&self, listfile: &Listfile) -> String {
        let mut out = listfile.filtered(|path| self.keeps(path)).to_csv();
        if *self == ListfileSubset::FrenchConverter {
            for (id, path) in NOGGIT_ERROR_TEXTURES {
                out.push_str(&super::table::format_line(*id, path));
                out.push('\n');
            }
        }
        out
    }
}

/// Extension of a virtual path including the leading dot, or `""`.
///
/// Only the last `/`-separated segment is considered, and a trailing dot
/// counts as no extension.
pub fn extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}
