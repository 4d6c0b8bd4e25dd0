// src/exec/mod.rs

//! Converter process execution.
//!
//! - [`backend`] provides the `ProcessSupervisor` / `SupervisedProcess`
//!   traits the conversion stages depend on.
//! - [`process`] is the production supervisor on `tokio::process::Command`.
//! - [`monitor`] echoes converter output and kills a converter once its exit
//!   marker appears.

pub mod backend;
pub mod monitor;
pub mod process;

pub use backend::{BoxFuture, LaunchSpec, ProcessSupervisor, SupervisedProcess};
pub use monitor::{supervise, ExitMarker, LinePredicate};
pub use process::TokioSupervisor;
