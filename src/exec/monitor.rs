// src/exec/monitor.rs

//! Output echo and marker-triggered termination.
//!
//! Some converters never exit on their own: SLFiledataADTConverter waits for
//! a keypress and the MTXP adder idles after printing its summary. Each
//! converter therefore gets a [`LinePredicate`]; the first output line that
//! matches it causes the process to be killed.

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::backend::SupervisedProcess;
use crate::types::ExitReport;

/// Decides, line by line, whether a converter should be force-terminated.
pub trait LinePredicate: Send + Sync {
    fn matches(&self, line: &str) -> bool;
}

impl<F> LinePredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, line: &str) -> bool {
        self(line)
    }
}

/// Substring marker. An empty marker never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitMarker {
    needle: String,
}

impl ExitMarker {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    pub fn never() -> Self {
        Self::new("")
    }
}

impl LinePredicate for ExitMarker {
    fn matches(&self, line: &str) -> bool {
        !self.needle.is_empty() && line.contains(&self.needle)
    }
}

/// Echo every line of `process` to the console until it closes its pipes or
/// a line matches `kill_when`, then wait for it to exit.
///
/// After a forced kill no further output is read.
pub async fn supervise(
    converter: &str,
    mut process: Box<dyn SupervisedProcess>,
    kill_when: &dyn LinePredicate,
) -> Result<ExitReport> {
    let mut forced = false;

    while let Some(line) = process.next_line().await {
        println!("[{converter}] {}", line.text);
        debug!(converter = %converter, stream = %line.stream, "{}", line.text);

        if kill_when.matches(&line.text) {
            info!(converter = %converter, "exit marker seen; terminating converter");
            if let Err(err) = process.kill().await {
                warn!(converter = %converter, error = %err, "failed to kill converter");
            }
            forced = true;
            break;
        }
    }

    let code = process.wait().await?;
    let report = ExitReport { code, forced };

    info!(
        converter = %converter,
        exit_code = ?report.code,
        forced = report.forced,
        "converter exited"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_substring_match() {
        let marker = ExitMarker::new("Press any key to exit the program");
        assert!(marker.matches("Done. Press any key to exit the program..."));
        assert!(!marker.matches("press any key to exit the program"));
    }

    #[test]
    fn empty_marker_never_matches() {
        let marker = ExitMarker::never();
        assert!(!marker.matches(""));
        assert!(!marker.matches("All done!"));
    }

    #[test]
    fn closures_are_predicates() {
        let pred = |line: &str| line.ends_with("!");
        assert!(LinePredicate::matches(&pred, "All done!"));
        assert!(!LinePredicate::matches(&pred, "working"));
    }
}
