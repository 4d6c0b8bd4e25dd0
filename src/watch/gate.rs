// src/watch/gate.rs

//! Single-slot run gate and the watcher's delivery switch.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use crate::types::ProcessingState;

/// Enables or disables delivery of file change events.
///
/// Checked inside the notify callback; events seen while disabled are
/// dropped, not buffered. Clones share the same flag.
#[derive(Debug, Clone)]
pub struct DeliverySwitch {
    enabled: Arc<AtomicBool>,
}

impl Default for DeliverySwitch {
    fn default() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl DeliverySwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }
}

/// At most one conversion run at a time.
///
/// `try_acquire` is a compare-and-swap from `Idle` to `Running`, so two
/// events racing on different threads can never both win.
#[derive(Debug, Default)]
pub struct RunGate {
    state: AtomicU8,
}

impl RunGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProcessingState {
        ProcessingState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Claim the gate and disable `switch`.
    ///
    /// Returns `None` without touching anything if a run is active.
    pub fn try_acquire(self: &Arc<Self>, switch: &DeliverySwitch) -> Option<RunPermit> {
        self.state
            .compare_exchange(
                ProcessingState::Idle as u8,
                ProcessingState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()?;

        switch.disable();

        Some(RunPermit {
            gate: Arc::clone(self),
            switch: switch.clone(),
        })
    }
}

/// Held for the duration of one run.
///
/// Dropping it (normal completion, error, or unwinding panic) re-enables
/// event delivery and returns the gate to `Idle`.
#[derive(Debug)]
pub struct RunPermit {
    gate: Arc<RunGate>,
    switch: DeliverySwitch,
}

impl Drop for RunPermit {
    fn drop(&mut self) {
        self.switch.enable();
        self.gate
            .state
            .store(ProcessingState::Idle as u8, Ordering::Release);
    }
}
