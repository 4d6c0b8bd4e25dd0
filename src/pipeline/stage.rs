// src/pipeline/stage.rs

//! One converter step: clear its folders, stage inputs, run it, harvest outputs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{RenameRule, Settings};
use crate::errors::{Result, UpconvertError};
use crate::exec::{supervise, BoxFuture, ExitMarker, LaunchSpec, ProcessSupervisor};
use crate::fs::FileSystem;
use crate::types::ExitReport;
use crate::watch::FilePattern;

pub const FRENCH_CONVERTER_NAME: &str = "SLFiledataADTConverter";
pub const MTXP_CONVERTER_NAME: &str = "7x_TexAdt_MTXP_Adder";

/// A step of the conversion pipeline.
///
/// The pipeline drives each stage through the same fixed sequence; tests
/// implement this trait to observe ordering without real converters.
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;

    /// Delete every file in the stage's input and output folders.
    /// Returns the number of files deleted.
    fn reset(&self) -> Result<usize>;

    /// Files this stage should consume, read from its source folder.
    fn collect_inputs(&self) -> Result<Vec<PathBuf>>;

    /// Copy `files` into the stage's input folder; returns the new paths.
    fn stage_inputs(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>>;

    /// Run the converter to completion.
    fn run(&self) -> BoxFuture<'_, Result<ExitReport>>;

    /// Copy results to their destination; returns the written paths.
    fn harvest_outputs(&self) -> Result<Vec<PathBuf>>;
}

/// Where a stage takes its inputs from and how they are copied in.
#[derive(Debug, Clone)]
pub struct InputRule {
    pub source_dir: PathBuf,
    pub pattern: FilePattern,
    pub rename: Option<RenameRule>,
}

/// Which outputs are kept and where they go. Existing files are replaced.
#[derive(Debug, Clone)]
pub struct HarvestRule {
    pub pattern: FilePattern,
    pub destination: PathBuf,
}

/// A converter executable with fixed `input`/`output` folders next to it.
pub struct ConverterStage {
    launch: LaunchSpec,
    input_dir: PathBuf,
    output_dir: PathBuf,
    inputs: InputRule,
    harvest: HarvestRule,
    exit_marker: ExitMarker,
    fs: Arc<dyn FileSystem>,
    supervisor: Arc<dyn ProcessSupervisor>,
}

impl fmt::Debug for ConverterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterStage")
            .field("launch", &self.launch)
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("inputs", &self.inputs)
            .field("harvest", &self.harvest)
            .field("exit_marker", &self.exit_marker)
            .finish_non_exhaustive()
    }
}

impl ConverterStage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        launch: LaunchSpec,
        input_dir: PathBuf,
        output_dir: PathBuf,
        inputs: InputRule,
        harvest: HarvestRule,
        exit_marker: ExitMarker,
        fs: Arc<dyn FileSystem>,
        supervisor: Arc<dyn ProcessSupervisor>,
    ) -> Self {
        Self {
            launch,
            input_dir,
            output_dir,
            inputs,
            harvest,
            exit_marker,
            fs,
            supervisor,
        }
    }

    /// SLFiledataADTConverter: every file of the monitored folder in
    /// (renamed per the rename rule), `*.adt` out to the output folder.
    pub fn french(
        settings: &Settings,
        fs: Arc<dyn FileSystem>,
        supervisor: Arc<dyn ProcessSupervisor>,
    ) -> Result<Self> {
        let base = settings.french_base_dir();
        Ok(Self::new(
            LaunchSpec::in_own_dir(FRENCH_CONVERTER_NAME, &settings.french_converter_path, &base),
            base.join("INPUT"),
            base.join("OUTPUT"),
            InputRule {
                source_dir: settings.monitor_dir.clone(),
                pattern: FilePattern::any()?,
                rename: settings.rename.clone(),
            },
            HarvestRule {
                pattern: FilePattern::adt()?,
                destination: settings.output_dir.clone(),
            },
            ExitMarker::new(&settings.french_exit_marker),
            fs,
            supervisor,
        ))
    }

    /// MTXP adder: `*_tex0.adt` from the output folder in, everything it
    /// produces back out to the output folder.
    pub fn mtxp(
        settings: &Settings,
        fs: Arc<dyn FileSystem>,
        supervisor: Arc<dyn ProcessSupervisor>,
    ) -> Result<Self> {
        let base = settings.mtxp_base_dir();
        Ok(Self::new(
            LaunchSpec::in_own_dir(MTXP_CONVERTER_NAME, &settings.mtxp_converter_path, &base),
            base.join("Input"),
            base.join("Output"),
            InputRule {
                source_dir: settings.output_dir.clone(),
                pattern: FilePattern::tex0()?,
                rename: None,
            },
            HarvestRule {
                pattern: FilePattern::any()?,
                destination: settings.output_dir.clone(),
            },
            ExitMarker::new(&settings.mtxp_exit_marker),
            fs,
            supervisor,
        ))
    }

    fn clear_dir(&self, dir: &Path) -> Result<usize> {
        let files = self.fs.list_files(dir)?;
        for file in &files {
            info!(stage = %self.launch.name, file = %file.display(), "deleting");
            self.fs.remove_file(file)?;
        }
        Ok(files.len())
    }
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("path has no UTF-8 file name: {:?}", path).into())
}

impl Stage for ConverterStage {
    fn name(&self) -> &str {
        &self.launch.name
    }

    fn reset(&self) -> Result<usize> {
        let inputs = self.clear_dir(&self.input_dir)?;
        let outputs = self.clear_dir(&self.output_dir)?;
        Ok(inputs + outputs)
    }

    fn collect_inputs(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .fs
            .list_files(&self.inputs.source_dir)?
            .into_iter()
            .filter(|p| self.inputs.pattern.matches_path(p))
            .collect())
    }

    fn stage_inputs(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut staged = Vec::with_capacity(files.len());

        for file in files {
            let name = file_name(file)?;
            let target_name = match &self.inputs.rename {
                Some(rule) => rule.apply(name),
                None => name.to_string(),
            };
            let target = self.input_dir.join(target_name);

            if self.fs.exists(&target) {
                return Err(UpconvertError::FileExists(target));
            }

            info!(
                stage = %self.launch.name,
                from = %file.display(),
                to = %target.display(),
                "copying input"
            );
            self.fs.copy(file, &target)?;
            staged.push(target);
        }

        Ok(staged)
    }

    fn run(&self) -> BoxFuture<'_, Result<ExitReport>> {
        Box::pin(async move {
            let process = self.supervisor.start(&self.launch)?;
            let report = supervise(&self.launch.name, process, &self.exit_marker).await?;

            if !report.success() {
                warn!(
                    stage = %self.launch.name,
                    exit_code = ?report.code,
                    "converter exited unsuccessfully; continuing"
                );
            }

            Ok(report)
        })
    }

    fn harvest_outputs(&self) -> Result<Vec<PathBuf>> {
        let mut harvested = Vec::new();

        for file in self.fs.list_files(&self.output_dir)? {
            if !self.harvest.pattern.matches_path(&file) {
                continue;
            }
            let target = self.harvest.destination.join(file_name(&file)?);

            info!(
                stage = %self.launch.name,
                from = %file.display(),
                to = %target.display(),
                "copying output"
            );
            self.fs.copy(&file, &target)?;
            harvested.push(target);
        }

        Ok(harvested)
    }
}
