// src/watch/mod.rs

//! File watching and run dispatch.
//!
//! This module is responsible for:
//! - Matching file names against the `*.adt` / `*_tex0.adt` patterns.
//! - Wiring up a cross-platform filesystem watcher (`notify`) on the
//!   monitored map folder.
//! - Gating pipeline runs so at most one is active, dropping (not queueing)
//!   changes that arrive meanwhile.

pub mod dispatcher;
pub mod gate;
pub mod patterns;
pub mod watcher;

pub use dispatcher::{reap_run, Dispatcher};
pub use gate::{DeliverySwitch, RunGate, RunPermit};
pub use patterns::FilePattern;
pub use watcher::{is_write_event, spawn_watcher, WatcherHandle};
