// src/config/mod.rs

//! Settings loading and validation for autoupconvert.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a settings file from disk (`loader.rs`).
//! - Check required keys and configured paths (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, load_settings};
pub use model::{RawSettings, RenameRule, Settings};
pub use validate::validate_paths;
