// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpconvertError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{} not found in current directory", .0.display())]
    ListfileNotFound(PathBuf),

    #[error("Malformed listfile {}:{line}: {message}", path.display())]
    ListfileParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to launch {converter}: {message}")]
    ConverterLaunch { converter: String, message: String },

    #[error("File already exists: {}", .0.display())]
    FileExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("File watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, UpconvertError>;
