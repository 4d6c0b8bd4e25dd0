// src/listfile/distributor.rs

//! Writes each consumer's filtered listfile into place. Runs once at startup.

use std::path::PathBuf;

use tracing::info;

use crate::config::Settings;
use crate::errors::Result;
use crate::fs::FileSystem;

use super::subset::ListfileSubset;
use super::table::Listfile;

/// One listfile to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListfileTarget {
    pub subset: ListfileSubset,
    pub destination: PathBuf,
}

/// Result of writing one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributedListfile {
    pub subset: ListfileSubset,
    pub destination: PathBuf,
    pub lines: usize,
}

/// Destinations for every configured consumer, in write order.
///
/// - `<converter A dir>/listfile/listfile.csv`
/// - `<converter B dir>/listfile.csv`
/// - `<epsilon dir>/_retail_/Tools/listfile.csv`, only with an Epsilon dir
pub fn targets(settings: &Settings) -> Vec<ListfileTarget> {
    let mut targets = vec![
        ListfileTarget {
            subset: ListfileSubset::FrenchConverter,
            destination: settings.french_base_dir().join("listfile").join("listfile.csv"),
        },
        ListfileTarget {
            subset: ListfileSubset::MtxpConverter,
            destination: settings.mtxp_base_dir().join("listfile.csv"),
        },
    ];

    if let Some(epsilon) = &settings.epsilon_dir {
        targets.push(ListfileTarget {
            subset: ListfileSubset::EpsilonMirror,
            destination: epsilon.join("_retail_").join("Tools").join("listfile.csv"),
        });
    }

    targets
}

/// Render and write every target, replacing existing files.
pub fn distribute(
    listfile: &Listfile,
    settings: &Settings,
    fs: &dyn FileSystem,
) -> Result<Vec<DistributedListfile>> {
    let mut written = Vec::new();

    for target in targets(settings) {
        let contents = target.subset.render(listfile);
        let lines = contents.lines().count();
        fs.write(&target.destination, contents.as_bytes())?;

        info!(
            consumer = %target.subset,
            path = %target.destination.display(),
            lines,
            "listfile written"
        );

        written.push(DistributedListfile {
            subset: target.subset,
            destination: target.destination,
            lines,
        });
    }

    Ok(written)
}
