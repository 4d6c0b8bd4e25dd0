// src/pipeline/runner.rs

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::errors::Result;
use crate::exec::ProcessSupervisor;
use crate::fs::FileSystem;
use crate::types::ExitReport;

use super::stage::{ConverterStage, Stage};

/// What one stage did during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub name: String,
    pub deleted: usize,
    pub staged: Vec<PathBuf>,
    pub exit: ExitReport,
    pub harvested: Vec<PathBuf>,
}

/// What a whole run did, stage by stage in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub stages: Vec<StageReport>,
}

impl RunSummary {
    pub fn harvested_count(&self) -> usize {
        self.stages.iter().map(|s| s.harvested.len()).sum()
    }
}

/// Ordered list of stages run strictly one after another.
///
/// A failing step aborts the run and is returned to the caller; nothing
/// already copied or deleted is rolled back.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name()).collect();
        f.debug_struct("Pipeline").field("stages", &names).finish()
    }
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// SLFiledataADTConverter followed by the MTXP adder.
    pub fn from_settings(
        settings: &Settings,
        fs: Arc<dyn FileSystem>,
        supervisor: Arc<dyn ProcessSupervisor>,
    ) -> Result<Self> {
        let french = ConverterStage::french(settings, Arc::clone(&fs), Arc::clone(&supervisor))?;
        let mtxp = ConverterStage::mtxp(settings, fs, supervisor)?;
        Ok(Self::new(vec![Box::new(french), Box::new(mtxp)]))
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name())
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for stage in &self.stages {
            let name = stage.name().to_string();
            info!(stage = %name, "stage starting");

            let deleted = stage.reset()?;
            let inputs = stage.collect_inputs()?;
            let staged = stage.stage_inputs(&inputs)?;
            let exit = stage.run().await?;
            let harvested = stage.harvest_outputs()?;

            info!(
                stage = %name,
                deleted,
                staged = staged.len(),
                harvested = harvested.len(),
                "stage finished"
            );

            summary.stages.push(StageReport {
                name,
                deleted,
                staged,
                exit,
                harvested,
            });
        }

        Ok(summary)
    }
}
