// src/exec/process.rs

//! Real converter processes via `tokio::process`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::{Result, UpconvertError};
use crate::exec::backend::{BoxFuture, LaunchSpec, ProcessSupervisor, SupervisedProcess};
use crate::types::{OutputLine, OutputStream};

/// Spawns converters directly (no shell) with both pipes captured.
///
/// Must be used from inside a Tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct TokioSupervisor;

impl ProcessSupervisor for TokioSupervisor {
    fn start(&self, spec: &LaunchSpec) -> Result<Box<dyn SupervisedProcess>> {
        let launch_error = |e: std::io::Error| UpconvertError::ConverterLaunch {
            converter: spec.name.clone(),
            message: e.to_string(),
        };

        let program = resolve_program(&spec.program).map_err(launch_error)?;
        let working_dir = std::path::absolute(&spec.working_dir).map_err(launch_error)?;

        info!(
            converter = %spec.name,
            program = %program.display(),
            cwd = %working_dir.display(),
            "starting converter process"
        );

        let mut cmd = Command::new(&program);
        cmd.args(&spec.args)
            .current_dir(&working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(launch_error)?;

        // Both readers feed one channel; it closes once both pipes hit EOF.
        let (tx, rx) = mpsc::channel::<OutputLine>(256);

        if let Some(stdout) = child.stdout.take() {
            spawn_line_reader(spec.name.clone(), stdout, OutputStream::Stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_line_reader(spec.name.clone(), stderr, OutputStream::Stderr, tx);
        }

        Ok(Box::new(TokioProcess { child, lines: rx }))
    }
}

/// Anchor a relative program path to our own working directory.
///
/// The child is started inside its own folder, and how a relative program
/// path is resolved after `current_dir` differs between platforms. Bare
/// names such as `sh` are left alone so they are still looked up on `PATH`.
fn resolve_program(program: &Path) -> std::io::Result<PathBuf> {
    if program.is_absolute() || program.components().count() <= 1 {
        return Ok(program.to_path_buf());
    }
    std::path::absolute(program)
}

struct TokioProcess {
    child: Child,
    lines: mpsc::Receiver<OutputLine>,
}

impl SupervisedProcess for TokioProcess {
    fn next_line(&mut self) -> BoxFuture<'_, Option<OutputLine>> {
        Box::pin(async move { self.lines.recv().await })
    }

    fn kill(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.child.kill().await?;
            Ok(())
        })
    }

    fn wait(&mut self) -> BoxFuture<'_, Result<Option<i32>>> {
        Box::pin(async move {
            let status = self.child.wait().await?;
            Ok(status.code())
        })
    }
}

/// Read `reader` line by line into `tx`.
///
/// Converters are not guaranteed to print UTF-8, so lines are decoded lossily
/// and a trailing `\r` is dropped.
fn spawn_line_reader<R>(
    converter: String,
    reader: R,
    stream: OutputStream,
    tx: mpsc::Sender<OutputLine>,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut segments = BufReader::new(reader).split(b'\n');

        loop {
            match segments.next_segment().await {
                Ok(Some(raw)) => {
                    let text = String::from_utf8_lossy(&raw)
                        .trim_end_matches('\r')
                        .to_string();
                    if tx.send(OutputLine { stream, text }).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    debug!(
                        converter = %converter,
                        %stream,
                        error = %err,
                        "output pipe read failed"
                    );
                    break;
                }
            }
        }

        debug!(converter = %converter, %stream, "output reader ended");
    });
}
