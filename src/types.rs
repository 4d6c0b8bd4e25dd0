use std::fmt;

/// Whether a conversion run is currently active.
///
/// Only one run may be `Running` at a time; see [`crate::watch::RunGate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ProcessingState {
    #[default]
    Idle = 0,
    Running = 1,
}

impl ProcessingState {
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => ProcessingState::Running,
            _ => ProcessingState::Idle,
        }
    }
}

/// Which pipe of a converter a captured line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStream::Stdout => f.write_str("stdout"),
            OutputStream::Stderr => f.write_str("stderr"),
        }
    }
}

/// A single line captured from a converter process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: OutputStream,
    pub text: String,
}

impl OutputLine {
    pub fn stdout(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stdout,
            text: text.into(),
        }
    }

    pub fn stderr(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stderr,
            text: text.into(),
        }
    }
}

/// How a converter process ended.
///
/// `forced` is set when the process was killed because one of its output
/// lines matched its exit marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    pub code: Option<i32>,
    pub forced: bool,
}

impl ExitReport {
    pub fn success(&self) -> bool {
        self.forced || self.code == Some(0)
    }
}
