// crates/test-utils/src/fake_stage.rs

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use autoupconvert::errors::{Result, UpconvertError};
use autoupconvert::exec::BoxFuture;
use autoupconvert::pipeline::Stage;
use autoupconvert::types::ExitReport;
use tokio::sync::Notify;

/// Shared, ordered log of `"<stage>:<step>"` entries.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// A `Stage` that records each step it is asked to perform.
///
/// Optionally blocks inside `run` until released, or fails at a named step.
pub struct RecordingStage {
    name: String,
    log: CallLog,
    release: Option<Arc<Notify>>,
    fail_at: Option<&'static str>,
    panic_in_run: bool,
}

impl RecordingStage {
    pub fn new(name: &str, log: CallLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            release: None,
            fail_at: None,
            panic_in_run: false,
        }
    }

    /// Block in `run` until `release.notify_one()` is called.
    pub fn blocking(mut self, release: Arc<Notify>) -> Self {
        self.release = Some(release);
        self
    }

    /// Return an error from the given step (`"reset"`, `"collect"`,
    /// `"stage"`, `"run"` or `"harvest"`).
    pub fn failing_at(mut self, step: &'static str) -> Self {
        self.fail_at = Some(step);
        self
    }

    /// Panic inside `run`, as a bug in a stage would.
    pub fn panicking_in_run(mut self) -> Self {
        self.panic_in_run = true;
        self
    }

    fn record(&self, step: &'static str) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, step));
        if self.fail_at == Some(step) {
            return Err(UpconvertError::Other(anyhow::anyhow!(
                "{} failed at {}",
                self.name,
                step
            )));
        }
        Ok(())
    }
}

impl Stage for RecordingStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&self) -> Result<usize> {
        self.record("reset")?;
        Ok(0)
    }

    fn collect_inputs(&self) -> Result<Vec<PathBuf>> {
        self.record("collect")?;
        Ok(Vec::new())
    }

    fn stage_inputs(&self, _files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        self.record("stage")?;
        Ok(Vec::new())
    }

    fn run(&self) -> BoxFuture<'_, Result<ExitReport>> {
        Box::pin(async move {
            self.record("run")?;
            if self.panic_in_run {
                panic!("{} panicked in run", self.name);
            }
            if let Some(release) = &self.release {
                release.notified().await;
            }
            Ok(ExitReport {
                code: Some(0),
                forced: false,
            })
        })
    }

    fn harvest_outputs(&self) -> Result<Vec<PathBuf>> {
        self.record("harvest")?;
        Ok(Vec::new())
    }
}

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}
