// src/watch/dispatcher.rs

//! Turns file change events into pipeline runs, one at a time.

use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::pipeline::Pipeline;
use crate::types::ProcessingState;
use crate::watch::gate::{DeliverySwitch, RunGate};

/// Owns the run gate and starts a pipeline run per accepted change.
#[derive(Debug)]
pub struct Dispatcher {
    pipeline: Arc<Pipeline>,
    gate: Arc<RunGate>,
    switch: DeliverySwitch,
}

impl Dispatcher {
    pub fn new(pipeline: Arc<Pipeline>, switch: DeliverySwitch) -> Self {
        Self {
            pipeline,
            gate: Arc::new(RunGate::new()),
            switch,
        }
    }

    pub fn state(&self) -> ProcessingState {
        self.gate.state()
    }

    pub fn switch(&self) -> &DeliverySwitch {
        &self.switch
    }

    /// Handle one change to `path`.
    ///
    /// While a run is active the event is logged and dropped, and `None` is
    /// returned. Otherwise delivery is disabled and a run is spawned; the
    /// returned handle completes once the gate is idle again. Run errors are
    /// logged here and never propagated.
    pub fn dispatch(&self, path: &Path) -> Option<JoinHandle<()>> {
        info!(path = %path.display(), "file changed");

        let Some(permit) = self.gate.try_acquire(&self.switch) else {
            info!(path = %path.display(), "already processing a map update; skipping");
            return None;
        };

        let pipeline = Arc::clone(&self.pipeline);

        Some(tokio::spawn(async move {
            let _permit = permit;
            info!("processing map update");

            match pipeline.run().await {
                Ok(summary) => info!(
                    harvested = summary.harvested_count(),
                    "done processing map"
                ),
                Err(err) => error!(error = %err, "error processing map"),
            }
        }))
    }
}

/// Await a run spawned by [`Dispatcher::dispatch`] and report how its task
/// ended. Returns `false` if it panicked or was aborted.
///
/// The gate is released by then either way; this only surfaces the failure.
pub async fn reap_run(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(err) if err.is_panic() => {
            error!(error = %err, "map processing task panicked");
            false
        }
        Err(err) => {
            warn!(error = %err, "map processing task cancelled");
            false
        }
    }
}
