// src/exec/backend.rs

//! Pluggable process supervision.
//!
//! Conversion stages talk to a `ProcessSupervisor` instead of spawning
//! processes directly. Production code uses
//! [`TokioSupervisor`](super::process::TokioSupervisor); tests substitute a
//! supervisor that replays scripted output lines without touching the OS.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::errors::Result;
use crate::types::OutputLine;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Everything needed to launch one converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Human-readable name used in logs and console echo.
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl LaunchSpec {
    /// Launch `program` with no arguments from its own directory.
    pub fn in_own_dir(
        name: impl Into<String>,
        program: impl Into<PathBuf>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }
}

/// A running process whose output can be streamed and which can be killed.
pub trait SupervisedProcess: Send {
    /// Next captured line from stdout or stderr; `None` once both pipes close.
    fn next_line(&mut self) -> BoxFuture<'_, Option<OutputLine>>;

    /// Force-terminate the process.
    fn kill(&mut self) -> BoxFuture<'_, Result<()>>;

    /// Wait for the process to exit and return its exit code, if any.
    fn wait(&mut self) -> BoxFuture<'_, Result<Option<i32>>>;
}

/// Starts converter processes.
pub trait ProcessSupervisor: Send + Sync {
    fn start(&self, spec: &LaunchSpec) -> Result<Box<dyn SupervisedProcess>>;
}
