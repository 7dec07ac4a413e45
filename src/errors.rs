// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status used for fatal pipeline errors.
pub const FATAL_EXIT_CODE: i32 = -1;

#[derive(Error, Debug)]
pub enum PolishError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Program {0} is not implemented.")]
    ToolNotImplemented(String),

    #[error("No valid executor found: neither apptainer nor singularity is on PATH")]
    NoExecutionBackend,

    #[error("Container image not found at {0:?}")]
    ContainerImageMissing(PathBuf),

    #[error("Expected output {0:?} does not exist")]
    MissingOutput(PathBuf),

    #[error("{tool} exited with status {code}")]
    ToolFailed { tool: String, code: i32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PolishError {
    /// Process exit status for this error.
    ///
    /// Configuration problems and missing pipeline outputs terminate the
    /// whole pipeline with [`FATAL_EXIT_CODE`]; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            PolishError::ConfigError(_)
            | PolishError::ToolNotImplemented(_)
            | PolishError::NoExecutionBackend
            | PolishError::ContainerImageMissing(_)
            | PolishError::MissingOutput(_)
            | PolishError::ToolFailed { .. } => FATAL_EXIT_CODE,
            PolishError::IoError(_) | PolishError::TomlError(_) | PolishError::Other(_) => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PolishError>;
