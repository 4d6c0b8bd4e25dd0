// src/listfile/table.rs

//! In-memory listfile: file data id -> virtual path.

use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::errors::{Result, UpconvertError};
use crate::fs::FileSystem;

/// Numeric file data identifier.
pub type FileId = u32;

/// Ordered `id -> path` table.
///
/// Iteration order is first-insertion order; overwriting an id keeps its
/// original position. Paths are forward-slash virtual paths and are never
/// resolved against disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listfile {
    entries: IndexMap<FileId, String>,
}

impl Listfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the listfile from `sources`.
    ///
    /// The first source is required and a missing file is reported as
    /// [`UpconvertError::ListfileNotFound`]. Every later source is an optional
    /// overlay: skipped when absent, otherwise merged last-write-wins with each
    /// of its lines echoed to the operator.
    pub fn load<P: AsRef<Path>>(fs: &dyn FileSystem, sources: &[P]) -> Result<Self> {
        let mut listfile = Listfile::new();
        let mut sources = sources.iter().map(AsRef::as_ref);

        let Some(primary) = sources.next() else {
            return Err(UpconvertError::ConfigError(
                "no listfile source given".to_string(),
            ));
        };

        if !fs.is_file(primary) {
            return Err(UpconvertError::ListfileNotFound(primary.to_path_buf()));
        }

        info!(path = %primary.display(), "loading listfile");
        let contents = fs.read_to_string(primary)?;
        listfile.merge_lines(primary, &contents, false)?;
        info!(entries = listfile.len(), "listfile loaded");

        for overlay in sources {
            if !fs.is_file(overlay) {
                continue;
            }
            info!(path = %overlay.display(), "loading custom listfile");
            let contents = fs.read_to_string(overlay)?;
            listfile.merge_lines(overlay, &contents, true)?;
        }

        Ok(listfile)
    }

    fn merge_lines(&mut self, source: &Path, contents: &str, echo: bool) -> Result<()> {
        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let (id, path) = parse_line(line).map_err(|message| UpconvertError::ListfileParse {
                path: source.to_path_buf(),
                line: idx + 1,
                message,
            })?;
            if echo {
                info!(%line, "added file from custom listfile");
            }
            self.insert(id, path);
        }
        Ok(())
    }

    /// Insert or overwrite an entry. Returns the previous path for `id`.
    pub fn insert(&mut self, id: FileId, path: impl Into<String>) -> Option<String> {
        self.entries.insert(id, path.into())
    }

    pub fn get(&self, id: FileId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &str)> {
        self.entries.iter().map(|(id, path)| (*id, path.as_str()))
    }

    /// New table holding only the entries whose path satisfies `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Listfile {
        let entries = self
            .entries
            .iter()
            .filter(|(_, path)| keep(path))
            .map(|(id, path)| (*id, path.clone()))
            .collect();
        Listfile { entries }
    }

    /// `id;path` lines joined with `\n`, with a trailing newline.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for (id, path) in self.iter() {
            out.push_str(&format_line(id, path));
            out.push('\n');
        }
        out
    }
}

impl FromIterator<(FileId, String)> for Listfile {
    fn from_iter<T: IntoIterator<Item = (FileId, String)>>(iter: T) -> Self {
        let mut listfile = Listfile::new();
        for (id, path) in iter {
            listfile.insert(id, path);
        }
        listfile
    }
}

pub fn format_line(id: FileId, path: &str) -> String {
    format!("{id};{path}")
}

/// Parse one `id;path` line. The path is the second `;`-separated field.
pub fn parse_line(line: &str) -> std::result::Result<(FileId, String), String> {
    let mut parts = line.split(';');
    let id_part = parts.next().unwrap_or_default();
    let path = parts
        .next()
        .ok_or_else(|| format!("expected `<id>;<path>`, got {line:?}"))?;
    let id = id_part
        .trim()
        .parse::<FileId>()
        .map_err(|e| format!("invalid file id {id_part:?}: {e}"))?;
    Ok((id, path.to_string()))
}
